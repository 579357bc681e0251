// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claim shapes for access and refresh tokens.

use serde::{Deserialize, Serialize};

/// Verified identity claims carried by an access token.
///
/// Produced by [`TokenService::validate_access`](super::TokenService::validate_access)
/// and attached to the request extensions by the authentication gate.
/// Immutable once constructed; lives exactly as long as the request.
///
/// `roles` keeps the order the token was issued with. Role names are plain
/// strings rather than [`Role`](super::Role) values so a token may carry
/// roles the current registry does not recognize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
    /// Expiry (Unix seconds).
    pub exp: i64,
    /// Issued-at (Unix seconds).
    pub iat: i64,
    /// Not-before (Unix seconds).
    pub nbf: i64,
    pub iss: String,
    /// Subject: the user id.
    pub sub: String,
}

/// Minimal claims carried by a refresh token.
///
/// Deliberately omits identity and role data: a refreshed session is
/// re-derived from the authoritative identity source, never trusted from
/// the old token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    pub iss: String,
    pub sub: String,
}
