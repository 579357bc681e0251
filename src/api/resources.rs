// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Resource endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::CurrentUser,
    error::ApiError,
    models::{CreateResourceRequest, Resource},
    state::AppState,
};

/// List all resources.
#[utoipa::path(
    get,
    path = "/api/v1/resources",
    tag = "Resources",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All resources", body = [Resource]),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Missing the resource:list permission"),
    )
)]
pub async fn list_resources(
    CurrentUser(claims): CurrentUser,
    State(state): State<AppState>,
) -> Json<Vec<Resource>> {
    tracing::info!(user_id = %claims.user_id, username = %claims.username, "listing resources");
    let store = state.resources.read().await;
    Json(store.list())
}

/// Create a resource owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/resources",
    request_body = CreateResourceRequest,
    tag = "Resources",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Resource created", body = Resource),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Missing the resource:write permission"),
    )
)]
pub async fn create_resource(
    CurrentUser(claims): CurrentUser,
    State(state): State<AppState>,
    Json(request): Json<CreateResourceRequest>,
) -> (StatusCode, Json<Resource>) {
    let mut store = state.resources.write().await;
    let resource = store.create(&claims.user_id, request);

    tracing::info!(
        user_id = %claims.user_id,
        resource_id = %resource.id,
        name = %resource.name,
        "resource created"
    );

    (StatusCode::CREATED, Json(resource))
}

/// Delete a resource.
#[utoipa::path(
    delete,
    path = "/api/v1/resources/{id}",
    params(("id" = String, Path, description = "Resource id")),
    tag = "Resources",
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Resource deleted"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Missing the resource:delete permission"),
        (status = 404, description = "Unknown resource id"),
    )
)]
pub async fn delete_resource(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.resources.write().await;
    store.delete(&id)?;

    tracing::info!(user_id = %claims.user_id, resource_id = %id, "resource deleted");

    Ok(StatusCode::NO_CONTENT)
}
