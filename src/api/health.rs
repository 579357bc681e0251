// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Health, readiness, and metrics probes. Never wrapped by the gates.

use axum::{
    extract::State,
    http::{header, StatusCode},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Liveness probe response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

/// Readiness probe response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadyResponse {
    pub status: String,
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

/// Readiness probe.
///
/// The service has no external dependencies to wait for; once the process
/// answers, it is ready.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Health",
    responses((status = 200, description = "Service is ready", body = ReadyResponse))
)]
pub async fn ready() -> Json<ReadyResponse> {
    Json(ReadyResponse {
        status: "ready".to_string(),
    })
}

/// Minimal Prometheus-style metrics.
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses((status = 200, description = "Plain-text metrics"))
)]
pub async fn metrics(State(state): State<AppState>) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let uptime = state.started_at.elapsed().as_secs();
    let body = format!(
        "# HELP api_server_uptime_seconds API server uptime in seconds\n\
         # TYPE api_server_uptime_seconds gauge\n\
         api_server_uptime_seconds {uptime}\n"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
}
