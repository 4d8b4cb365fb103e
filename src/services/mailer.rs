// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Feedback mail delivery through an HTTP mail relay.

use crate::config::MailConfig;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Who sent the feedback.
#[derive(Debug, Clone)]
pub struct FeedbackSender {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// A feedback submission ready to be mailed.
#[derive(Debug, Clone)]
pub struct Feedback {
    pub sender: FeedbackSender,
    /// Rating from 1 to 5
    pub rating: u8,
    pub message: String,
}

/// Message handed to the relay.
#[derive(Debug, Serialize)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Sends feedback mail via the configured relay.
#[derive(Clone)]
pub struct FeedbackMailer {
    http: reqwest::Client,
    config: MailConfig,
}

impl FeedbackMailer {
    pub fn new(config: MailConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Compose and relay one feedback message.
    pub async fn send(&self, feedback: &Feedback) -> Result<(), AppError> {
        let (relay_url, user, receiver) = match (
            &self.config.relay_url,
            &self.config.user,
            &self.config.receiver,
        ) {
            (Some(url), Some(user), Some(receiver)) => (url, user, receiver),
            _ => return Err(AppError::Mail("Mail relay is not configured".to_string())),
        };

        let mail = compose(feedback, user, receiver, Utc::now());

        let response = self
            .http
            .post(relay_url)
            .json(&mail)
            .send()
            .await
            .map_err(|e| AppError::Mail(format!("Mail relay request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Mail(format!("Mail relay HTTP {}: {}", status, body)));
        }

        tracing::info!(sender_id = feedback.sender.id, rating = feedback.rating, "Feedback mail sent");
        Ok(())
    }
}

/// Render feedback as plain text and HTML.
pub fn compose(feedback: &Feedback, user: &str, receiver: &str, sent_at: DateTime<Utc>) -> OutgoingMail {
    let sender = &feedback.sender;
    let rating = feedback.rating.min(5) as usize;
    let stars = format!("{}{}", "★".repeat(rating), "☆".repeat(5 - rating));
    let sent_at = sent_at.format("%Y-%m-%d %H:%M:%S UTC");

    let text = format!(
        "User ID: {}\nName: {}\nEmail: {}\nRating: {}/5\nMessage: {}\n",
        sender.id, sender.name, sender.email, rating, feedback.message
    );

    let html = format!(
        concat!(
            "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">",
            "<h2 style=\"color: #333;\">New Feedback Received</h2>",
            "<div style=\"background: #f8f9fa; padding: 20px; border-radius: 8px;\">",
            "<p><strong>User ID:</strong> {id}</p>",
            "<p><strong>Name:</strong> {name}</p>",
            "<p><strong>Email:</strong> {email}</p>",
            "<p><strong>Rating:</strong> {stars}</p>",
            "<p><strong>Message:</strong></p>",
            "<div style=\"background: white; padding: 10px; border-radius: 4px; border: 1px solid #eee;\">",
            "<p>{message}</p>",
            "</div>",
            "<p style=\"margin-top: 15px; color: #666; font-size: 0.9em;\">Sent at: {sent_at}</p>",
            "</div></div>"
        ),
        id = sender.id,
        name = escape_html(&sender.name),
        email = escape_html(&sender.email),
        stars = stars,
        message = escape_html(&feedback.message).replace('\n', "<br>"),
        sent_at = sent_at,
    );

    OutgoingMail {
        from: format!("\"RecipeApp Feedback\" <{}>", user),
        to: receiver.to_string(),
        subject: format!("New Feedback from {}", sender.name),
        text,
        html,
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
