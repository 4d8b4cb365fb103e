// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side error taxonomy.

use crate::client::selection::SelectionError;

/// Errors seen by the client core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// No session, or the gateway refused it.
    #[error("Not signed in")]
    Unauthenticated,

    /// The gateway reported a backend failure.
    #[error("{0}")]
    UpstreamFailure(String),

    /// The request could not complete.
    #[error("Network error: {0}")]
    NetworkFailure(String),

    /// The user cancelled the request.
    #[error("Request cancelled")]
    UserCancelled,

    /// The input was rejected before any request was made.
    #[error(transparent)]
    ValidationFailure(#[from] SelectionError),

    /// A generation request is already in flight.
    #[error("A recipe generation is already in progress")]
    AlreadyPending,

    /// Local storage could not be read or written.
    #[error("Local storage error: {0}")]
    Storage(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::NetworkFailure(err.to_string())
    }
}

/// Result type alias for the client core
pub type Result<T> = std::result::Result<T, ClientError>;
