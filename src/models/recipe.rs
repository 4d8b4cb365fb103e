// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Recipe models: generated recipes, saved recipes and their videos.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Ingredients split into what the user has and what must be bought.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RecipeIngredients {
    #[serde(default)]
    pub available: Vec<String>,
    #[serde(default)]
    pub needed: Vec<String>,
}

/// One numbered instruction step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Instruction {
    /// Step label; the model emits both `"1"` and `1`
    #[serde(deserialize_with = "string_or_number")]
    pub step: String,
    pub description: String,
}

/// A recipe video found on YouTube.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct YoutubeVideo {
    pub video_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub published_at: String,
}

/// A recipe as produced by generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Recipe {
    pub name: String,
    #[serde(default)]
    pub ingredients: RecipeIngredients,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
    /// Nutrient name to amount, e.g. `"protein" -> "10g"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default)]
    pub cook_time: String,
    #[serde(default)]
    pub total_time: String,
    #[serde(default)]
    pub servings: u32,
    #[serde(default)]
    pub youtube_videos: Vec<YoutubeVideo>,
}

/// Generation response body: `{"recipes": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GeneratedRecipes {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

/// A recipe stored by the backend for the current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SavedRecipe {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: i64,
    #[serde(flatten)]
    pub recipe: Recipe,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Step {
        Text(String),
        Number(i64),
    }

    Ok(match Step::deserialize(deserializer)? {
        Step::Text(s) => s,
        Step::Number(n) => n.to_string(),
    })
}
