// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gateway configuration loaded from environment variables.
//!
//! Mail relay settings are optional; without them the feedback handler
//! reports a failure instead of refusing to start.

use std::env;

/// Default location of the recipe backend during local development.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Gateway configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the recipe/inventory/auth backend
    pub backend_url: String,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Production mode marks session cookies `Secure`
    pub production: bool,
    /// Feedback mail relay settings
    pub mail: MailConfig,
}

/// Where feedback mail is relayed.
#[derive(Debug, Clone, Default)]
pub struct MailConfig {
    /// HTTP endpoint accepting outgoing messages
    pub relay_url: Option<String>,
    /// Sender account
    pub user: Option<String>,
    /// Recipient of feedback messages
    pub receiver: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => 3000,
        };

        Ok(Self {
            backend_url: env::var("BACKEND_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port,
            production: env::var("APP_ENV")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
            mail: MailConfig {
                relay_url: non_empty_var("MAIL_RELAY_URL"),
                user: non_empty_var("MAIL_USER"),
                receiver: non_empty_var("FEEDBACK_RECEIVER"),
            },
        })
    }

    /// Config for tests: local backend, development cookies, no mail relay.
    pub fn test_default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            port: 3000,
            production: false,
            mail: MailConfig::default(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
