// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Extractor for claims attached by the authentication gate.
//!
//! Use `CurrentUser` in handlers that need the caller's identity:
//!
//! ```rust,ignore
//! async fn my_handler(CurrentUser(claims): CurrentUser) -> impl IntoResponse {
//!     // claims.user_id, claims.roles, ...
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{claims::AccessClaims, AuthError};

/// The verified identity of the calling user.
///
/// Reads the [`AccessClaims`] the authentication gate stored in the
/// request extensions. Absence is an explicit error (the route was not
/// wrapped by the gate, or the gate failed), answered with 401 — never a
/// silent default identity.
pub struct CurrentUser(pub AccessClaims);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AccessClaims>()
            .cloned()
            .map(CurrentUser)
            .ok_or(AuthError::MissingClaims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn sample_claims() -> AccessClaims {
        AccessClaims {
            user_id: "1".to_string(),
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            roles: vec!["admin".to_string()],
            exp: 0,
            iat: 0,
            nbf: 0,
            iss: "api-server".to_string(),
            sub: "1".to_string(),
        }
    }

    #[tokio::test]
    async fn extracts_claims_from_extensions() {
        let mut parts = Request::builder()
            .uri("/test")
            .body(())
            .unwrap()
            .into_parts()
            .0;
        parts.extensions.insert(sample_claims());

        let CurrentUser(claims) = CurrentUser::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(claims.user_id, "1");
    }

    #[tokio::test]
    async fn absent_claims_reject_as_unauthenticated() {
        let mut parts = Request::builder()
            .uri("/test")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let result = CurrentUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthError::MissingClaims)));
    }
}
