// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication & Authorization
//!
//! Request-level access control for the API, split into two composable
//! gates wired ahead of every protected route:
//!
//! 1. The **authentication gate** ([`middleware::authenticate`]) reads
//!    `Authorization: Bearer <token>`, verifies the token through the
//!    [`TokenService`], and attaches the resulting [`AccessClaims`] to the
//!    request.
//! 2. The **authorization gate** ([`AuthorizeLayer`]) evaluates a per-route
//!    access rule — a required permission, role, or any-of role set —
//!    against the [`RoleRegistry`] and the attached claims.
//!
//! ## Security
//!
//! - Tokens are stateless: validity is signature + temporal bounds, so any
//!   process holding the shared secret can validate any token.
//! - Only HMAC-family algorithms are accepted (algorithm-confusion defense).
//! - Validation failures collapse to a single 401 shape; responses never
//!   reveal whether a token was expired, malformed, or forged.
//! - Refresh tokens carry no roles; refreshing re-reads the authoritative
//!   identity record.

pub mod authz;
pub mod claims;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod rbac;
pub mod service;

pub use authz::{require_any_role, require_permission, require_role, AuthorizeLayer};
pub use claims::{AccessClaims, RefreshClaims};
pub use error::AuthError;
pub use extractor::CurrentUser;
pub use rbac::{Permission, Role, RoleRegistry};
pub use service::{TokenError, TokenPair, TokenService};
