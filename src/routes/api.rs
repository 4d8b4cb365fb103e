// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Protected gateway routes forwarding to the recipe backend.
//!
//! Every route here sits behind `require_session`; payloads from the backend
//! are passed through unchanged.

use crate::error::{AppError, Result};
use crate::services::SessionToken;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// API routes (require a session cookie).
/// The session middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/inventory", get(get_inventory))
        .route("/api/recipe", post(generate_recipes))
        .route("/api/save-recipe", post(save_recipe))
        .route("/api/get-saved-recipes", get(get_saved_recipes))
        .route("/api/youtube-search", post(search_videos))
}

// ─── Inventory ───────────────────────────────────────────────

/// Pantry inventory grouped by category.
async fn get_inventory(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<SessionToken>,
) -> Result<Json<Value>> {
    let data = state
        .backend
        .get("/inventory", &token, "Failed to fetch inventory")
        .await?;
    Ok(Json(data))
}

// ─── Recipes ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct GenerateRequest {
    ingredients: Vec<String>,
}

/// Ask the backend to generate recipes from the selected ingredients.
async fn generate_recipes(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<SessionToken>,
    payload: std::result::Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(request) = payload?;

    tracing::info!(count = request.ingredients.len(), "Generating recipes");

    let body = json!({ "ingredients": request.ingredients });
    let data = state
        .backend
        .post(
            "/recipes/generate",
            Some(&token),
            &body,
            "Failed to generate recipes",
        )
        .await?;
    Ok(Json(data))
}

/// Save a recipe for the current user.
async fn save_recipe(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<SessionToken>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(recipe) = payload?;
    let body = with_video_list(recipe)?;

    let data = state
        .backend
        .post("/recipes/save", Some(&token), &body, "Failed to save recipe")
        .await?;
    Ok(Json(data))
}

/// Recipes previously saved by the current user.
async fn get_saved_recipes(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<SessionToken>,
) -> Result<Json<Value>> {
    let data = state
        .backend
        .get("/recipes/saved", &token, "Failed to fetch saved recipes")
        .await?;
    Ok(Json(data))
}

// ─── Videos ──────────────────────────────────────────────────

#[derive(Deserialize)]
struct VideoSearchRequest {
    recipe_name: String,
}

/// Find cooking videos for a recipe.
async fn search_videos(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<SessionToken>,
    payload: std::result::Result<Json<VideoSearchRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(request) = payload?;

    let body = json!({ "recipe_name": request.recipe_name });
    let data = state
        .backend
        .post(
            "/recipes/youtube-search",
            Some(&token),
            &body,
            "Failed to search videos",
        )
        .await?;
    Ok(Json(data))
}

/// The backend requires `youtube_videos`; default it to an empty list.
fn with_video_list(recipe: Value) -> Result<Value> {
    let Value::Object(mut fields) = recipe else {
        return Err(AppError::BadRequest(
            "Recipe must be a JSON object".to_string(),
        ));
    };

    match fields.get("youtube_videos") {
        Some(Value::Array(_)) => {}
        _ => {
            fields.insert("youtube_videos".to_string(), Value::Array(Vec::new()));
        }
    }
    Ok(Value::Object(fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_video_list_adds_missing_field() {
        let body = with_video_list(json!({"name": "Dal"})).unwrap();
        assert_eq!(body["youtube_videos"], json!([]));
        assert_eq!(body["name"], "Dal");
    }

    #[test]
    fn test_with_video_list_replaces_null() {
        let body = with_video_list(json!({"name": "Dal", "youtube_videos": null})).unwrap();
        assert_eq!(body["youtube_videos"], json!([]));
    }

    #[test]
    fn test_with_video_list_keeps_existing_videos() {
        let videos = json!([{"video_id": "v1", "title": "Dal at home"}]);
        let body = with_video_list(json!({"name": "Dal", "youtube_videos": videos.clone()})).unwrap();
        assert_eq!(body["youtube_videos"], videos);
    }

    #[test]
    fn test_with_video_list_rejects_non_object() {
        assert!(matches!(
            with_video_list(json!(["Dal"])),
            Err(AppError::BadRequest(_))
        ));
    }
}
