// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token cookie handling.
//!
//! The bearer token lives in an HTTP-only cookie so page script never sees
//! it. "Verification" here is presence-only: the token is opaque to the
//! gateway and only the backend can judge it.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::fmt;

/// Name of the HTTP-only cookie holding the bearer token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Name of the client-readable profile mirror cookie.
pub const USER_COOKIE: &str = "user";

/// Session cookie lifetime.
pub const SESSION_MAX_AGE: time::Duration = time::Duration::days(1);

/// Opaque bearer credential read from the session cookie.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token value, for the `Authorization` header only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Build the session cookie for a freshly issued token.
pub fn access_token_cookie(token: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, token.to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(SESSION_MAX_AGE)
        .path("/")
        .build()
}

/// Build a cookie that invalidates the session cookie.
///
/// Attributes must match the ones used at creation or browsers keep the
/// original cookie.
pub fn clear_access_token_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, ""))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::ZERO)
        .path("/")
        .build()
}

/// Read the session token from the request cookies.
pub fn read_token(jar: &CookieJar) -> Option<SessionToken> {
    jar.get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().trim())
        .filter(|value| !value.is_empty())
        .map(SessionToken::new)
}

/// Whether the request carries a session token at all.
pub fn verify_token(jar: &CookieJar) -> bool {
    read_token(jar).is_some()
}
