// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{auth::CurrentUser, error::ApiError, models::User, state::AppState};

/// List all users.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All users", body = [User]),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Missing the user:list permission"),
    )
)]
pub async fn list_users(
    CurrentUser(claims): CurrentUser,
    State(state): State<AppState>,
) -> Json<Vec<User>> {
    tracing::info!(user_id = %claims.user_id, username = %claims.username, "listing users");
    Json(state.users.list())
}

/// Get a single user by id.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Caller holds neither admin nor user role"),
        (status = 404, description = "Unknown user id"),
    )
)]
pub async fn get_user(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<User>, ApiError> {
    tracing::info!(requester_id = %claims.user_id, target_id = %id, "getting user details");

    state
        .users
        .find_by_id(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("user not found"))
}
