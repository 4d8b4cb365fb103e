// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User feedback route.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::routes::SuccessResponse;
use crate::services::mailer::{Feedback, FeedbackSender};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/send-feedback", post(send_feedback))
}

#[derive(Debug, Deserialize)]
pub struct FeedbackUser {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub user_data: FeedbackUser,
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

/// Relay user feedback by mail. Every failure is reported as 500.
async fn send_feedback(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>> {
    let Json(request) = payload.map_err(|e| AppError::Mail(e.body_text()))?;
    request
        .validate()
        .map_err(|e| AppError::Mail(e.to_string()))?;

    let feedback = Feedback {
        sender: FeedbackSender {
            id: request.user_data.id,
            name: request.user_data.name,
            email: request.user_data.email,
        },
        rating: request.rating,
        message: request.message,
    };

    state.mailer.send(&feedback).await?;
    Ok(SuccessResponse::ok())
}
