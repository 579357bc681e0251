// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;

use crate::auth::{RoleRegistry, TokenService};
use crate::config::Config;
use crate::store::{ResourceStore, UserDirectory};

/// Shared application state.
///
/// The token service, role registry, and user directory are immutable
/// after construction and shared across requests without locking. Only
/// the resource store mutates and sits behind a lock.
#[derive(Clone)]
pub struct AppState {
    pub token_service: Arc<TokenService>,
    pub registry: Arc<RoleRegistry>,
    pub users: Arc<UserDirectory>,
    pub resources: Arc<RwLock<ResourceStore>>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            token_service: Arc::new(TokenService::new(&config.auth)),
            registry: Arc::new(RoleRegistry::new()),
            users: Arc::new(UserDirectory::new()),
            resources: Arc::new(RwLock::new(ResourceStore::new())),
            started_at: Instant::now(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
