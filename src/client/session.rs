// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication state for one running client.
//!
//! State flows `Uninitialized -> Checking -> {Authenticated, Unauthenticated}`.
//! The manager is owned by the application context and mutated only through
//! `&mut self`, so there is exactly one writer.

use crate::client::error::Result;
use crate::client::gateway::AuthApi;
use crate::client::mirror::ProfileMirror;
use crate::models::UserProfile;
use std::sync::Arc;

/// Where the UI should go after a session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Login,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Checking,
    Authenticated(UserProfile),
    Unauthenticated,
}

/// Owns the client's view of the session.
pub struct SessionManager<A: AuthApi> {
    api: Arc<A>,
    mirror: ProfileMirror,
    state: SessionState,
    initialized: bool,
}

impl<A: AuthApi> SessionManager<A> {
    pub fn new(api: Arc<A>, mirror: ProfileMirror) -> Self {
        Self {
            api,
            mirror,
            state: SessionState::Uninitialized,
            initialized: false,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Signed-in user, if any.
    pub fn user(&self) -> Option<&UserProfile> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// True until the first check has settled.
    pub fn is_loading(&self) -> bool {
        matches!(
            self.state,
            SessionState::Uninitialized | SessionState::Checking
        )
    }

    /// Establish the session state.
    ///
    /// A mirrored profile is trusted without a network call. Otherwise the
    /// gateway is asked and a confirmed profile is mirrored.
    pub async fn check_auth(&mut self) -> bool {
        self.state = SessionState::Checking;

        if let Some(profile) = self.mirror.read() {
            tracing::debug!(user_id = profile.id, "Session restored from profile mirror");
            self.state = SessionState::Authenticated(profile);
            return true;
        }

        match self.api.verify().await {
            Ok(profile) => {
                if let Err(e) = self.mirror.write(&profile) {
                    tracing::warn!(error = %e, "Failed to mirror verified profile");
                }
                self.state = SessionState::Authenticated(profile);
                true
            }
            Err(e) => {
                tracing::info!(error = %e, "Session verification failed");
                self.state = SessionState::Unauthenticated;
                false
            }
        }
    }

    /// Run the startup check once. Later calls reuse the settled state.
    pub async fn initialize(&mut self) -> Navigation {
        if !self.initialized {
            self.initialized = true;
            self.check_auth().await;
        }

        match self.state {
            SessionState::Authenticated(_) => Navigation::Stay,
            _ => Navigation::Login,
        }
    }

    /// Adopt a token and profile obtained from the login handler.
    ///
    /// On failure an existing session is kept; otherwise the state
    /// settles as unauthenticated.
    pub async fn login(&mut self, token: &str, profile: UserProfile) -> bool {
        if let Err(e) = self.api.set_token(token).await {
            tracing::warn!(error = %e, "Failed to store session token");
            if !matches!(self.state, SessionState::Authenticated(_)) {
                self.state = SessionState::Unauthenticated;
            }
            return false;
        }

        if let Err(e) = self.mirror.write(&profile) {
            tracing::warn!(error = %e, "Failed to mirror profile");
        }
        tracing::info!(user_id = profile.id, "Signed in");
        self.state = SessionState::Authenticated(profile);
        true
    }

    /// Log in with credentials, then adopt the issued session.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<bool> {
        let response = self.api.login(email, password).await?;
        Ok(self.login(&response.access_token, response.user).await)
    }

    /// End the session. The server-side clear is best effort; local state
    /// is always reset.
    pub async fn logout(&mut self) -> Navigation {
        if let Err(e) = self.api.clear_token().await {
            tracing::warn!(error = %e, "Server-side logout failed");
        }

        if let Err(e) = self.mirror.clear() {
            tracing::warn!(error = %e, "Failed to clear profile mirror");
        }
        self.state = SessionState::Unauthenticated;
        Navigation::Login
    }
}
