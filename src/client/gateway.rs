// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client for the gateway.
//!
//! The client keeps its own cookie store, so the HTTP-only session cookie
//! set by the gateway is replayed automatically and never surfaces through
//! this API.

use crate::client::error::{ClientError, Result};
use crate::models::{GeneratedRecipes, Inventory, LoginResponse, Recipe, SavedRecipe, UserProfile, YoutubeVideo};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::future::Future;

/// Session operations used by the session manager.
pub trait AuthApi: Send + Sync {
    /// Ask the gateway whether a session cookie is present.
    fn verify(&self) -> impl Future<Output = Result<UserProfile>> + Send;

    /// Store a bearer token in the HTTP-only session cookie.
    fn set_token(&self, token: &str) -> impl Future<Output = Result<()>> + Send;

    /// Clear the session cookie.
    fn clear_token(&self) -> impl Future<Output = Result<()>> + Send;

    /// Exchange credentials for a token and profile.
    fn login(&self, email: &str, password: &str) -> impl Future<Output = Result<LoginResponse>> + Send;
}

/// Recipe generation used by the orchestrator.
pub trait RecipeApi: Send + Sync + 'static {
    fn generate(&self, ingredients: &[String]) -> impl Future<Output = Result<Vec<Recipe>>> + Send;
}

/// Fields for a new account.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub gender: Option<String>,
}

#[derive(Deserialize)]
struct VerifyBody {
    #[serde(default)]
    verified: bool,
    #[serde(default)]
    user: UserProfile,
}

#[derive(Deserialize)]
struct VideoList {
    #[serde(default)]
    videos: Vec<YoutubeVideo>,
}

/// Gateway client with a private cookie store.
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Create an account.
    pub async fn register(&self, registration: &Registration) -> Result<UserProfile> {
        let response = self
            .http
            .post(self.url("/api/register"))
            .json(registration)
            .send()
            .await?;
        read_json(response).await
    }

    /// Pantry inventory grouped by category.
    pub async fn inventory(&self) -> Result<Inventory> {
        let response = self.http.get(self.url("/api/inventory")).send().await?;
        read_json(response).await
    }

    /// Save a generated recipe, optionally with videos attached.
    pub async fn save_recipe(&self, recipe: &Recipe) -> Result<SavedRecipe> {
        let response = self
            .http
            .post(self.url("/api/save-recipe"))
            .json(recipe)
            .send()
            .await?;
        read_json(response).await
    }

    pub async fn saved_recipes(&self) -> Result<Vec<SavedRecipe>> {
        let response = self
            .http
            .get(self.url("/api/get-saved-recipes"))
            .send()
            .await?;
        read_json(response).await
    }

    /// Cooking videos for a recipe.
    pub async fn search_videos(&self, recipe_name: &str) -> Result<Vec<YoutubeVideo>> {
        let response = self
            .http
            .post(self.url("/api/youtube-search"))
            .json(&json!({ "recipe_name": recipe_name }))
            .send()
            .await?;
        let list: VideoList = read_json(response).await?;
        Ok(list.videos)
    }

    /// Send feedback from the signed-in user.
    pub async fn send_feedback(&self, user: &UserProfile, rating: u8, message: &str) -> Result<()> {
        let body = json!({
            "userData": { "id": user.id, "name": user.name, "email": user.email },
            "rating": rating,
            "message": message,
        });
        let response = self
            .http
            .post(self.url("/api/send-feedback"))
            .json(&body)
            .send()
            .await?;
        check_status(response).await.map(|_| ())
    }
}

impl AuthApi for GatewayClient {
    async fn verify(&self) -> Result<UserProfile> {
        let response = self.http.get(self.url("/api/auth/verify")).send().await?;
        let body: VerifyBody = read_json(response).await?;
        if !body.verified {
            return Err(ClientError::Unauthenticated);
        }
        Ok(body.user)
    }

    async fn set_token(&self, token: &str) -> Result<()> {
        let response = self
            .http
            .post(self.url("/api/auth/set-token"))
            .json(&json!({ "token": token }))
            .send()
            .await?;
        check_status(response).await.map(|_| ())
    }

    async fn clear_token(&self) -> Result<()> {
        let response = self.http.post(self.url("/api/auth/logout")).send().await?;
        check_status(response).await.map(|_| ())
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let response = self
            .http
            .post(self.url("/api/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        read_json(response).await
    }
}

impl RecipeApi for GatewayClient {
    async fn generate(&self, ingredients: &[String]) -> Result<Vec<Recipe>> {
        let response = self
            .http
            .post(self.url("/api/recipe"))
            .json(&json!({ "ingredients": ingredients }))
            .send()
            .await?;
        let generated: GeneratedRecipes = read_json(response).await?;
        Ok(generated.recipes)
    }
}

/// Map a gateway error response onto the client taxonomy.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthenticated);
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        error: String,
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .map(|body| body.error)
        .unwrap_or_else(|_| format!("Request failed with status {}", status));
    Err(ClientError::UpstreamFailure(message))
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    check_status(response)
        .await?
        .json()
        .await
        .map_err(|e| ClientError::UpstreamFailure(format!("Unexpected response: {}", e)))
}
