// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - backend forwarding, session cookies, feedback mail.

pub mod backend;
pub mod mailer;
pub mod token_store;

pub use backend::BackendClient;
pub use mailer::FeedbackMailer;
pub use token_store::SessionToken;
