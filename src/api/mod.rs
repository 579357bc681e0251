// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP router.
//!
//! Route wiring is where the gate ordering contract lives: the
//! authentication gate wraps the whole protected subtree, and each
//! protected route adds its own authorization rule, so authentication
//! always runs first and unprotected routes are never wrapped.

use axum::{
    handler::Handler,
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{
        middleware::authenticate, require_any_role, require_permission, Permission, Role,
    },
    models::{CreateResourceRequest, LoginRequest, LoginResponse, RefreshRequest, Resource, User},
    state::AppState,
};

pub mod auth;
pub mod health;
pub mod resources;
pub mod users;

pub fn router(state: AppState) -> Router {
    let registry = state.registry.clone();

    let public = Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/metrics", get(health::metrics))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh));

    let protected = Router::new()
        .route(
            "/api/v1/users",
            get(users::list_users
                .layer(require_permission(registry.clone(), Permission::UserList))),
        )
        .route(
            "/api/v1/users/{id}",
            get(users::get_user
                .layer(require_any_role(registry.clone(), &[Role::Admin, Role::User]))),
        )
        .route(
            "/api/v1/resources",
            get(resources::list_resources
                .layer(require_permission(registry.clone(), Permission::ResourceList)))
            .post(
                resources::create_resource
                    .layer(require_permission(registry.clone(), Permission::ResourceWrite)),
            ),
        )
        .route(
            "/api/v1/resources/{id}",
            delete(
                resources::delete_resource
                    .layer(require_permission(registry, Permission::ResourceDelete)),
            ),
        )
        .layer(middleware::from_fn_with_state(state.clone(), authenticate));

    Router::new()
        .merge(public)
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        auth::refresh,
        users::list_users,
        users::get_user,
        resources::list_resources,
        resources::create_resource,
        resources::delete_resource,
        health::health,
        health::ready,
        health::metrics
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            RefreshRequest,
            User,
            Resource,
            CreateResourceRequest,
            health::HealthResponse,
            health::ReadyResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login and token refresh"),
        (name = "Users", description = "User directory"),
        (name = "Resources", description = "Resource management"),
        (name = "Health", description = "Probes and metrics")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
