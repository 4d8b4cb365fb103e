// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe backend client.
//!
//! Forwards JSON to the backend and folds every kind of failure into the
//! gateway's uniform error shape:
//! - Non-success status: the backend's `message` (or `detail`) if present,
//!   else the caller's fallback message
//! - Transport errors and unreadable bodies: the fallback message

use crate::error::AppError;
use crate::services::token_store::SessionToken;
use reqwest::Method;
use serde_json::Value;

/// HTTP client for the recipe backend.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Forward a request and return the backend's JSON payload unchanged.
    ///
    /// `token` is attached as a bearer credential when present.
    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        token: Option<&SessionToken>,
        body: Option<&Value>,
        fallback: &str,
    ) -> Result<Value, AppError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http.request(method.clone(), &url);
        if let Some(token) = token {
            request = request.bearer_auth(token.expose());
        }
        request = match body {
            Some(body) => request.json(body),
            // Keep the content type even without a body
            None => request.header(reqwest::header::CONTENT_TYPE, "application/json"),
        };

        let response = request.send().await.map_err(|e| {
            tracing::warn!(method = %method, path, error = %e, "Backend request failed");
            AppError::Network(fallback.to_string())
        })?;

        let status = response.status();
        let payload: Value = response.json().await.map_err(|e| {
            tracing::warn!(path, status = status.as_u16(), error = %e, "Backend returned unreadable body");
            AppError::Network(fallback.to_string())
        })?;

        if !status.is_success() {
            let message = backend_message(&payload).unwrap_or(fallback).to_string();
            tracing::info!(path, status = status.as_u16(), message = %message, "Backend rejected request");
            return Err(AppError::Upstream(message));
        }

        tracing::debug!(path, status = status.as_u16(), "Backend request succeeded");
        Ok(payload)
    }

    /// GET a protected resource.
    pub async fn get(&self, path: &str, token: &SessionToken, fallback: &str) -> Result<Value, AppError> {
        self.forward(Method::GET, path, Some(token), None, fallback)
            .await
    }

    /// POST a JSON body, with or without a session.
    pub async fn post(
        &self,
        path: &str,
        token: Option<&SessionToken>,
        body: &Value,
        fallback: &str,
    ) -> Result<Value, AppError> {
        self.forward(Method::POST, path, token, Some(body), fallback)
            .await
    }
}

/// Extract a human-readable error message from a backend error body.
fn backend_message(payload: &Value) -> Option<&str> {
    ["message", "detail"]
        .iter()
        .filter_map(|key| payload.get(*key))
        .find_map(|value| value.as_str().filter(|msg| !msg.is_empty()))
}
