// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session cookie middleware for protected gateway routes.

use crate::error::AppError;
use crate::services::token_store::read_token;
use axum::{extract::Request, middleware::Next, response::Response};
use axum_extra::extract::cookie::CookieJar;

/// Middleware that requires a session cookie.
///
/// Requests without a token are answered with 401 before any backend call.
/// The token is handed to the handler as a `SessionToken` extension.
pub async fn require_session(
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = read_token(&jar) else {
        tracing::debug!(path = %request.uri().path(), "Rejected request without session cookie");
        return Err(AppError::Unauthenticated);
    };

    request.extensions_mut().insert(token);

    Ok(next.run(request).await)
}
