// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pantry Chef: session gateway and client core for AI recipe generation.
//!
//! The server half is a thin authenticated gateway in front of the recipe
//! backend. The `client` half holds the session manager, the cancellable
//! recipe-generation orchestrator and the result cache used by UI shells.

pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::{BackendClient, FeedbackMailer};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub backend: BackendClient,
    pub mailer: FeedbackMailer,
}

impl AppState {
    /// Build state with clients derived from the configuration.
    pub fn new(config: Config) -> Self {
        let backend = BackendClient::new(config.backend_url.clone());
        let mailer = FeedbackMailer::new(config.mail.clone());
        Self {
            config,
            backend,
            mailer,
        }
    }
}
