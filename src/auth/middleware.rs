// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication gate.
//!
//! Middleware placed in front of every protected route. It extracts the
//! bearer token, validates it through the token service, and attaches the
//! verified [`AccessClaims`] to the request extensions for the
//! authorization gate and handlers further down the chain. The claims are
//! request-scoped: they are dropped with the request and never shared
//! across requests.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::AuthError;
use crate::state::AppState;

/// Bearer-token authentication middleware.
///
/// Every failure — missing header, malformed header, expired or invalid
/// token — yields a 401 envelope; downstream code only ever observes
/// "authenticated" or "not".
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(&request) {
        Ok(token) => token,
        Err(error) => return error.into_response(),
    };

    match state.token_service.validate_access(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(error) => {
            tracing::warn!(error = %error, "token validation failed");
            AuthError::InvalidToken.into_response()
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The header must split into exactly two parts on the first space, with
/// the scheme literally `Bearer`.
fn bearer_token(request: &Request) -> Result<&str, AuthError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?;

    let value = header.to_str().map_err(|_| AuthError::InvalidAuthHeader)?;
    let (scheme, token) = value
        .split_once(' ')
        .ok_or(AuthError::InvalidAuthHeader)?;

    if scheme != "Bearer" || token.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }

    Ok(token)
}
