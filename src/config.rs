// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup and passed
//! by reference into the components that need it. Nothing reads the
//! environment after startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET` | Symmetric token signing secret | insecure placeholder |
//! | `JWT_EXPIRATION_SECS` | Access token lifetime | `900` (15 minutes) |
//! | `REFRESH_EXPIRATION_SECS` | Refresh token lifetime | `604800` (7 days) |
//! | `TOKEN_ISSUER` | `iss` claim stamped into tokens | `api-server` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Token signing and lifetime settings.
///
/// The secret is shared by every process validating tokens; validity is a
/// pure function of signature and expiry, so no coordination is needed.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub issuer: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            auth: AuthConfig {
                jwt_secret: "your-secret-key-change-in-production".to_string(),
                access_token_ttl: Duration::from_secs(15 * 60),
                refresh_token_ttl: Duration::from_secs(7 * 24 * 60 * 60),
                issuer: "api-server".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server: ServerConfig {
                host: env_or("HOST", defaults.server.host),
                port: env_parse("PORT", defaults.server.port),
            },
            auth: AuthConfig {
                jwt_secret: env_or("JWT_SECRET", defaults.auth.jwt_secret),
                access_token_ttl: Duration::from_secs(env_parse(
                    "JWT_EXPIRATION_SECS",
                    defaults.auth.access_token_ttl.as_secs(),
                )),
                refresh_token_ttl: Duration::from_secs(env_parse(
                    "REFRESH_EXPIRATION_SECS",
                    defaults.auth.refresh_token_ttl.as_secs(),
                )),
                issuer: env_or("TOKEN_ISSUER", defaults.auth.issuer),
            },
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default,
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
