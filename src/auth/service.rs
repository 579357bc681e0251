// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token issuance and validation.
//!
//! Tokens are signed with a shared symmetric secret (HS256) and are the
//! sole source of session truth: nothing is persisted server-side, so any
//! process holding the secret can validate any token.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use super::claims::{AccessClaims, RefreshClaims};
use crate::config::AuthConfig;
use crate::models::User;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Signed token pair produced by [`TokenService::issue`].
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Token service errors.
///
/// Validation failures collapse to two variants: callers (and therefore
/// clients) cannot distinguish a malformed token from a forged one.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signature was valid but the token is outside its temporal bounds.
    #[error("token has expired")]
    Expired,
    /// Malformed token, wrong signature, unexpected algorithm, or
    /// claims-shape mismatch.
    #[error("invalid token")]
    Invalid,
    /// Token construction failed during issuance.
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Issues and validates signed session tokens.
///
/// Key material is derived from configuration once at construction and
/// never mutated, so the service is safe to share across requests without
/// locking.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
    issuer: String,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Accept the HMAC family only; a token claiming any other
        // algorithm fails validation regardless of its signature.
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.validate_nbf = true;
        validation.leeway = CLOCK_SKEW_LEEWAY;

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            access_ttl_secs: config.access_token_ttl.as_secs() as i64,
            refresh_ttl_secs: config.refresh_token_ttl.as_secs() as i64,
            issuer: config.issuer.clone(),
        }
    }

    /// Produce an access/refresh token pair for a fully-resolved identity.
    pub fn issue(&self, user: &User) -> Result<TokenPair, TokenError> {
        let now = Utc::now().timestamp();
        let header = Header::new(Algorithm::HS256);

        let access = AccessClaims {
            user_id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            roles: user.roles.clone(),
            exp: now + self.access_ttl_secs,
            iat: now,
            nbf: now,
            iss: self.issuer.clone(),
            sub: user.id.clone(),
        };
        let access_token =
            encode(&header, &access, &self.encoding_key).map_err(TokenError::Signing)?;

        let refresh = RefreshClaims {
            exp: now + self.refresh_ttl_secs,
            iat: now,
            nbf: now,
            iss: self.issuer.clone(),
            sub: user.id.clone(),
        };
        let refresh_token =
            encode(&header, &refresh, &self.encoding_key).map_err(TokenError::Signing)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Verify an access token and return its identity claims.
    pub fn validate_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(map_validation_error)
    }

    /// Verify a refresh token and return the subject id it identifies.
    ///
    /// Only the subject comes back: the caller must re-fetch the current
    /// identity record rather than reuse roles from an old token.
    pub fn validate_refresh(&self, token: &str) -> Result<String, TokenError> {
        decode::<RefreshClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(map_validation_error)
    }

    /// Access token lifetime in seconds, for `expires_in` responses.
    pub fn access_ttl_secs(&self) -> u64 {
        self.access_ttl_secs as u64
    }
}

fn map_validation_error(error: jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use chrono::Utc;

    fn service() -> TokenService {
        TokenService::new(&Config::default().auth)
    }

    fn sample_user() -> User {
        User {
            id: "2".to_string(),
            username: "editor".to_string(),
            email: "editor@example.com".to_string(),
            password: "editor123".to_string(),
            roles: vec!["editor".to_string(), "user".to_string()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn issue_then_validate_round_trips_identity() {
        let service = service();
        let user = sample_user();

        let pair = service.issue(&user).unwrap();
        let claims = service.validate_access(&pair.access_token).unwrap();

        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.username, user.username);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.roles, user.roles);
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.iss, "api-server");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_access_token_is_rejected_as_expired() {
        let service = service();
        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            user_id: "2".to_string(),
            username: "editor".to_string(),
            email: "editor@example.com".to_string(),
            roles: vec!["editor".to_string()],
            exp: now - 3600,
            iat: now - 7200,
            nbf: now - 7200,
            iss: "api-server".to_string(),
            sub: "2".to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &service.encoding_key,
        )
        .unwrap();

        assert!(matches!(
            service.validate_access(&token),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let service = service();
        let pair = service.issue(&sample_user()).unwrap();

        let (prefix, signature) = pair.access_token.rsplit_once('.').unwrap();
        let mut flipped: Vec<u8> = signature.bytes().collect();
        flipped[0] = if flipped[0] == b'A' { b'B' } else { b'A' };
        let tampered = format!("{prefix}.{}", String::from_utf8(flipped).unwrap());

        assert!(matches!(
            service.validate_access(&tampered),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn non_hmac_algorithm_is_rejected() {
        let service = service();
        let now = Utc::now().timestamp();

        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(
            format!(
                r#"{{"user_id":"2","username":"editor","email":"editor@example.com","roles":["editor"],"exp":{},"iat":{},"nbf":{},"iss":"api-server","sub":"2"}}"#,
                now + 900,
                now,
                now
            )
            .as_bytes(),
        );
        let token = format!("{header}.{payload}.bm90LWEtc2lnbmF0dXJl");

        assert!(matches!(
            service.validate_access(&token),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let issuing = service();
        let mut other_config = Config::default().auth;
        other_config.jwt_secret = "a-completely-different-secret".to_string();
        let validating = TokenService::new(&other_config);

        let pair = issuing.issue(&sample_user()).unwrap();
        assert!(matches!(
            validating.validate_access(&pair.access_token),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn refresh_token_yields_subject_only() {
        let service = service();
        let user = sample_user();

        let pair = service.issue(&user).unwrap();
        let subject = service.validate_refresh(&pair.refresh_token).unwrap();
        assert_eq!(subject, user.id);
    }

    #[test]
    fn refresh_token_is_not_a_valid_access_token() {
        let service = service();
        let pair = service.issue(&sample_user()).unwrap();

        // The refresh claim shape lacks identity fields, so it must fail
        // access validation as a shape mismatch.
        assert!(matches!(
            service.validate_access(&pair.refresh_token),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn garbage_token_is_invalid() {
        let service = service();
        assert!(matches!(
            service.validate_access("not.a.token"),
            Err(TokenError::Invalid)
        ));
    }
}
