// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session endpoints: login and token refresh.

use axum::{extract::State, Json};

use crate::{
    error::ApiError,
    models::{LoginRequest, LoginResponse, RefreshRequest},
    state::AppState,
};

/// Exchange credentials for a token pair.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Token pair issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Some(user) = state.users.authenticate(&request.username, &request.password) else {
        tracing::warn!(username = %request.username, "login failed: invalid credentials");
        return Err(ApiError::unauthorized("invalid username or password"));
    };

    let pair = state.token_service.issue(user).map_err(|error| {
        tracing::error!(error = %error, "failed to generate token");
        ApiError::internal("failed to generate token")
    })?;

    tracing::info!(user_id = %user.id, username = %user.username, "user logged in");

    Ok(Json(LoginResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        expires_in: state.token_service.access_ttl_secs(),
        token_type: "Bearer".to_string(),
    }))
}

/// Exchange a refresh token for a fresh token pair.
///
/// The refresh token only identifies a subject; roles come from the
/// current directory record, not from the old token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    request_body = RefreshRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Token pair reissued", body = LoginResponse),
        (status = 401, description = "Invalid refresh token"),
    )
)]
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let subject = state
        .token_service
        .validate_refresh(&request.refresh_token)
        .map_err(|error| {
            tracing::warn!(error = %error, "invalid refresh token");
            ApiError::unauthorized("invalid refresh token")
        })?;

    let Some(user) = state.users.find_by_id(&subject) else {
        return Err(ApiError::unauthorized("user not found"));
    };

    let pair = state.token_service.issue(user).map_err(|error| {
        tracing::error!(error = %error, "failed to generate token");
        ApiError::internal("failed to generate token")
    })?;

    tracing::info!(user_id = %subject, "token refreshed");

    Ok(Json(LoginResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        expires_in: state.token_service.access_ttl_secs(),
        token_type: "Bearer".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn login_issues_tokens_for_valid_credentials() {
        let state = AppState::default();
        let Json(response) = login(
            State(state.clone()),
            Json(LoginRequest {
                username: "admin".to_string(),
                password: "admin123".to_string(),
            }),
        )
        .await
        .expect("login succeeds");

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 900);

        let claims = state
            .token_service
            .validate_access(&response.access_token)
            .unwrap();
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.roles, vec!["admin".to_string()]);
    }

    #[tokio::test]
    async fn login_rejects_bad_credentials() {
        let state = AppState::default();
        let error = login(
            State(state),
            Json(LoginRequest {
                username: "admin".to_string(),
                password: "nope".to_string(),
            }),
        )
        .await
        .expect_err("login fails");

        assert_eq!(error.status, axum::http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn refresh_reissues_from_directory_record() {
        let state = AppState::default();
        let Json(login_response) = login(
            State(state.clone()),
            Json(LoginRequest {
                username: "editor".to_string(),
                password: "editor123".to_string(),
            }),
        )
        .await
        .unwrap();

        let Json(refreshed) = refresh(
            State(state.clone()),
            Json(RefreshRequest {
                refresh_token: login_response.refresh_token,
            }),
        )
        .await
        .expect("refresh succeeds");

        let claims = state
            .token_service
            .validate_access(&refreshed.access_token)
            .unwrap();
        assert_eq!(claims.user_id, "2");
        assert_eq!(claims.roles, vec!["editor".to_string()]);
    }

    #[tokio::test]
    async fn refresh_rejects_garbage_tokens() {
        let state = AppState::default();
        let error = refresh(
            State(state),
            Json(RefreshRequest {
                refresh_token: "not.a.token".to_string(),
            }),
        )
        .await
        .expect_err("refresh fails");

        assert_eq!(error.status, axum::http::StatusCode::UNAUTHORIZED);
    }
}
