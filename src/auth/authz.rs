// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization gate.
//!
//! A family of per-route interceptors parameterized by an access rule.
//! Each `require_*` constructor captures its rule by value and returns an
//! [`AuthorizeLayer`]; the resulting [`Authorize`] service checks the
//! claims left in the request extensions by the authentication gate and
//! either rejects the request or delegates to the wrapped handler
//! unchanged.
//!
//! The check itself is synchronous map lookups; the gate holds no locks
//! and nothing that outlives the request.

use std::future::{ready, Future};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};

use super::claims::AccessClaims;
use super::rbac::{Permission, Role, RoleRegistry};
use super::AuthError;

/// Access rule captured by an [`AuthorizeLayer`].
#[derive(Debug, Clone)]
enum AccessRule {
    Permission(Permission),
    Role(Role),
    AnyRole(Vec<Role>),
}

/// Pass iff any held role grants `permission` via the registry.
pub fn require_permission(registry: Arc<RoleRegistry>, permission: Permission) -> AuthorizeLayer {
    AuthorizeLayer {
        registry,
        rule: AccessRule::Permission(permission),
    }
}

/// Pass iff `role` is literally present in the caller's role set.
pub fn require_role(registry: Arc<RoleRegistry>, role: Role) -> AuthorizeLayer {
    AuthorizeLayer {
        registry,
        rule: AccessRule::Role(role),
    }
}

/// Pass iff at least one of `roles` is present in the caller's role set.
pub fn require_any_role(registry: Arc<RoleRegistry>, roles: &[Role]) -> AuthorizeLayer {
    AuthorizeLayer {
        registry,
        rule: AccessRule::AnyRole(roles.to_vec()),
    }
}

/// Layer wrapping a route with an access rule check.
#[derive(Clone)]
pub struct AuthorizeLayer {
    registry: Arc<RoleRegistry>,
    rule: AccessRule,
}

impl<S> Layer<S> for AuthorizeLayer {
    type Service = Authorize<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Authorize {
            inner,
            registry: self.registry.clone(),
            rule: self.rule.clone(),
        }
    }
}

/// Interceptor produced by [`AuthorizeLayer`].
#[derive(Clone)]
pub struct Authorize<S> {
    inner: S,
    registry: Arc<RoleRegistry>,
    rule: AccessRule,
}

impl<S> Authorize<S> {
    /// Evaluate the captured rule against the request's claims.
    ///
    /// Absent claims are a defensive 401, distinct from the 403 a failed
    /// predicate produces. Denials are logged with the caller identity and
    /// the required grant for audit.
    fn check(&self, claims: Option<&AccessClaims>) -> Result<(), AuthError> {
        let Some(claims) = claims else {
            return Err(AuthError::MissingClaims);
        };

        match &self.rule {
            AccessRule::Permission(permission) => {
                if self.registry.check_permission(&claims.roles, *permission) {
                    return Ok(());
                }
                tracing::warn!(
                    user_id = %claims.user_id,
                    username = %claims.username,
                    roles = ?claims.roles,
                    permission = %permission,
                    "permission denied"
                );
                Err(AuthError::PermissionDenied)
            }
            AccessRule::Role(role) => {
                if self.registry.has_role(&claims.roles, *role) {
                    return Ok(());
                }
                tracing::warn!(
                    user_id = %claims.user_id,
                    username = %claims.username,
                    roles = ?claims.roles,
                    required_role = %role,
                    "role not found"
                );
                Err(AuthError::RoleDenied)
            }
            AccessRule::AnyRole(required) => {
                if self.registry.has_any_role(&claims.roles, required) {
                    return Ok(());
                }
                tracing::warn!(
                    user_id = %claims.user_id,
                    username = %claims.username,
                    roles = ?claims.roles,
                    required_roles = ?required,
                    "no matching role found"
                );
                Err(AuthError::RoleDenied)
            }
        }
    }
}

impl<S> Service<Request> for Authorize<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        if let Err(denied) = self.check(request.extensions().get::<AccessClaims>()) {
            return Box::pin(ready(Ok(denied.into_response())));
        }

        // Delegate to the instance poll_ready was called on.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move { inner.call(request).await })
    }
}
