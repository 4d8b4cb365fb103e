// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pantry Chef Gateway
//!
//! Holds the session cookie for the web client and forwards authenticated
//! requests to the recipe backend.

use pantry_chef::{config::Config, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        backend = %config.backend_url,
        production = config.production,
        "Starting Pantry Chef gateway"
    );

    if config.mail.relay_url.is_none() {
        tracing::warn!("MAIL_RELAY_URL not set, feedback submissions will fail");
    }

    // Build shared state
    let state = Arc::new(AppState::new(config.clone()));

    // Build router
    let app = pantry_chef::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(
                    "pantry_chef=debug"
                        .parse()
                        .expect("static directive is valid"),
                )
                .add_directive("info".parse().expect("static directive is valid")),
        )
        .with(format)
        .init();
}
