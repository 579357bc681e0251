// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication and authorization gate errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Errors produced by the two gates.
///
/// Only two failure kinds are observable from outside: unauthenticated
/// (401) and forbidden (403). Internal causes — expired vs. malformed vs.
/// forged — are collapsed before reaching this type so responses cannot be
/// used as a forgery oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No authorization header present.
    MissingAuthHeader,
    /// Header present but not `Bearer <token>`.
    InvalidAuthHeader,
    /// Token failed validation (expired or invalid, deliberately merged).
    InvalidToken,
    /// No claims in the request context; the authentication gate did not
    /// run or did not succeed.
    MissingClaims,
    /// Valid identity, but no held role grants the required permission.
    PermissionDenied,
    /// Valid identity, but the required role is not held.
    RoleDenied,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::InvalidToken
            | AuthError::MissingClaims => StatusCode::UNAUTHORIZED,
            AuthError::PermissionDenied | AuthError::RoleDenied => StatusCode::FORBIDDEN,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthHeader => write!(f, "missing authorization header"),
            AuthError::InvalidAuthHeader => write!(f, "invalid authorization header format"),
            AuthError::InvalidToken => write!(f, "invalid or expired token"),
            AuthError::MissingClaims => write!(f, "unauthorized"),
            AuthError::PermissionDenied => write!(f, "insufficient permissions"),
            AuthError::RoleDenied => write!(f, "insufficient role"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn missing_header_returns_401_with_envelope() {
        let response = AuthError::MissingAuthHeader.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error"], "missing authorization header");
    }

    #[tokio::test]
    async fn permission_denied_returns_403() {
        let response = AuthError::PermissionDenied.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn unauthenticated_variants_share_the_401_status() {
        for error in [
            AuthError::MissingAuthHeader,
            AuthError::InvalidAuthHeader,
            AuthError::InvalidToken,
            AuthError::MissingClaims,
        ] {
            assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
        }
    }
}
