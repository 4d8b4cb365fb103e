// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session routes: token cookie management, login and registration.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::models::{LoginResponse, UserProfile};
use crate::routes::SuccessResponse;
use crate::services::token_store::{access_token_cookie, clear_access_token_cookie, verify_token};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/set-token", post(set_token))
        .route("/api/auth/verify", get(verify))
        .route("/api/auth/logout", post(logout))
        .route("/api/login", post(login))
        .route("/api/register", post(register))
}

// ─── Token Cookie ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetTokenRequest {
    token: String,
}

/// Store a bearer token in the HTTP-only session cookie.
async fn set_token(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: std::result::Result<Json<SetTokenRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<SuccessResponse>)> {
    let Json(request) = payload?;

    let token = request.token.trim();
    if token.is_empty() {
        return Err(AppError::BadRequest("Failed to set token".to_string()));
    }

    tracing::info!("Session cookie issued");

    let jar = jar.add(access_token_cookie(token, state.config.production));
    Ok((jar, SuccessResponse::ok()))
}

/// Verification result.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct VerifyResponse {
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Report whether a session cookie is present.
///
/// This is a presence check only. The gateway holds no key material for the
/// backend's tokens, so it cannot tell a forged token from a real one and
/// it has no profile to return.
async fn verify(jar: CookieJar) -> Response {
    if !verify_token(&jar) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(VerifyResponse {
                verified: false,
                user: None,
                error: Some("No token found".to_string()),
            }),
        )
            .into_response();
    }

    Json(VerifyResponse {
        verified: true,
        user: Some(UserProfile::default()),
        error: None,
    })
    .into_response()
}

/// Clear the session cookie. Succeeds whether or not a session existed.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Json<SuccessResponse>) {
    tracing::info!(had_session = verify_token(&jar), "Session cookie cleared");
    let jar = jar.add(clear_access_token_cookie(state.config.production));
    (jar, SuccessResponse::ok())
}

// ─── Login / Registration ────────────────────────────────────

#[derive(Deserialize, Serialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

/// Exchange credentials for a bearer token and profile.
///
/// The token is returned to the caller, which stores it via set-token.
async fn login(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    const FALLBACK: &str = "Login failed";
    let Json(request) = payload?;

    let body = serde_json::to_value(&request).map_err(anyhow::Error::from)?;
    let data = state
        .backend
        .post("/users/login", None, &body, FALLBACK)
        .await?;

    let response: LoginResponse = serde_json::from_value(data).map_err(|e| {
        tracing::warn!(error = %e, "Unexpected login response shape");
        AppError::Upstream(FALLBACK.to_string())
    })?;

    tracing::info!(user_id = response.user.id, "User logged in");
    Ok(Json(response))
}

#[derive(Deserialize, Serialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
    name: String,
    #[serde(default)]
    gender: Option<String>,
}

/// Create an account; answers with the new user's public profile.
async fn register(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserProfile>)> {
    const FALLBACK: &str = "Registration failed";
    let Json(request) = payload?;

    let body = serde_json::to_value(&request).map_err(anyhow::Error::from)?;
    let data = state
        .backend
        .post("/users/signup", None, &body, FALLBACK)
        .await?;

    let profile: UserProfile = serde_json::from_value(data).map_err(|e| {
        tracing::warn!(error = %e, "Unexpected signup response shape");
        AppError::Upstream(FALLBACK.to_string())
    })?;

    tracing::info!(user_id = profile.id, "User registered");
    Ok((StatusCode::CREATED, Json(profile)))
}
