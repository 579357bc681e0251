// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory identity directory and resource store.
//!
//! Mock collaborators standing in for a real identity provider and
//! database. The directory is seeded at startup and read-only; the
//! resource store lives behind the `AppState` lock.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{CreateResourceRequest, Resource, User};

// =============================================================================
// User Directory
// =============================================================================

/// The identity source: resolves credentials and subject ids to identity
/// records. Always consulted fresh on refresh so role changes take effect
/// on the next token, not on some cached copy.
pub struct UserDirectory {
    users: HashMap<String, User>,
}

impl UserDirectory {
    pub fn new() -> Self {
        let now = Utc::now();
        let seed = [
            ("1", "admin", "admin@example.com", "admin123", "admin"),
            ("2", "editor", "editor@example.com", "editor123", "editor"),
            ("3", "viewer", "viewer@example.com", "viewer123", "viewer"),
        ];

        let users = seed
            .into_iter()
            .map(|(id, username, email, password, role)| {
                (
                    username.to_string(),
                    User {
                        id: id.to_string(),
                        username: username.to_string(),
                        email: email.to_string(),
                        password: password.to_string(),
                        roles: vec![role.to_string()],
                        created_at: now,
                        updated_at: now,
                    },
                )
            })
            .collect();

        Self { users }
    }

    /// Resolve credentials to an identity record.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<&User> {
        self.users
            .get(username)
            .filter(|user| user.password == password)
    }

    /// Current authoritative record for a subject id.
    pub fn find_by_id(&self, id: &str) -> Option<&User> {
        self.users.values().find(|user| user.id == id)
    }

    pub fn list(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.values().cloned().collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        users
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Resource Store
// =============================================================================

/// In-memory resource records, seeded with samples.
pub struct ResourceStore {
    resources: HashMap<String, Resource>,
}

impl ResourceStore {
    pub fn new() -> Self {
        let now = Utc::now();
        let seed = [
            Resource {
                id: "res-1".to_string(),
                name: "Sample Resource 1".to_string(),
                description: "This is a sample resource".to_string(),
                kind: "compute".to_string(),
                owner: "1".to_string(),
                metadata: HashMap::from([
                    ("region".to_string(), "us-west-2".to_string()),
                    ("env".to_string(), "production".to_string()),
                ]),
                created_at: now - Duration::hours(24),
                updated_at: now - Duration::hours(24),
            },
            Resource {
                id: "res-2".to_string(),
                name: "Sample Resource 2".to_string(),
                description: "Another sample resource".to_string(),
                kind: "storage".to_string(),
                owner: "2".to_string(),
                metadata: HashMap::from([
                    ("region".to_string(), "us-east-1".to_string()),
                    ("env".to_string(), "staging".to_string()),
                ]),
                created_at: now - Duration::hours(12),
                updated_at: now - Duration::hours(12),
            },
        ];

        Self {
            resources: seed
                .into_iter()
                .map(|resource| (resource.id.clone(), resource))
                .collect(),
        }
    }

    pub fn list(&self) -> Vec<Resource> {
        let mut resources: Vec<Resource> = self.resources.values().cloned().collect();
        resources.sort_by(|a, b| a.id.cmp(&b.id));
        resources
    }

    pub fn create(&mut self, owner: &str, request: CreateResourceRequest) -> Resource {
        let now = Utc::now();
        let resource = Resource {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            description: request.description,
            kind: request.kind,
            owner: owner.to_string(),
            metadata: request.metadata,
            created_at: now,
            updated_at: now,
        };
        self.resources
            .insert(resource.id.clone(), resource.clone());
        resource
    }

    pub fn delete(&mut self, id: &str) -> Result<(), ApiError> {
        self.resources
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ApiError::not_found("resource not found"))
    }
}

impl Default for ResourceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticate_checks_username_and_password() {
        let directory = UserDirectory::new();

        assert!(directory.authenticate("admin", "admin123").is_some());
        assert!(directory.authenticate("admin", "wrong").is_none());
        assert!(directory.authenticate("ghost", "admin123").is_none());
    }

    #[test]
    fn find_by_id_resolves_subjects() {
        let directory = UserDirectory::new();
        let user = directory.find_by_id("2").unwrap();
        assert_eq!(user.username, "editor");
        assert!(directory.find_by_id("99").is_none());
    }

    #[test]
    fn list_is_sorted_and_complete() {
        let directory = UserDirectory::new();
        let users = directory.list();
        assert_eq!(users.len(), 3);
        assert_eq!(users[0].id, "1");
        assert_eq!(users[2].id, "3");
    }

    #[test]
    fn create_and_delete_resources() {
        let mut store = ResourceStore::new();
        assert_eq!(store.list().len(), 2);

        let created = store.create(
            "2",
            CreateResourceRequest {
                name: "db".to_string(),
                description: "primary".to_string(),
                kind: "storage".to_string(),
                metadata: HashMap::new(),
            },
        );
        assert_eq!(created.owner, "2");
        assert_eq!(store.list().len(), 3);

        store.delete(&created.id).unwrap();
        assert_eq!(store.list().len(), 2);
        assert!(store.delete(&created.id).is_err());
    }
}
