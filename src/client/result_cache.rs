// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Single-slot cache of the most recently generated recipes.
//!
//! Last write wins; there is no history and no eviction. The slot lives in
//! the client's local storage so the recipe view can read it after
//! navigation.

use crate::client::error::{ClientError, Result};
use crate::client::storage::LocalStorage;
use crate::models::Recipe;
use std::sync::Arc;

/// Local storage key of the slot.
pub const GENERATED_RECIPES_KEY: &str = "generated_recipes";

/// Nothing has been generated in this session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("No recipes found. Please generate recipes again.")]
pub struct CacheMiss;

/// Handle to the result slot. Clones share the same storage.
#[derive(Clone)]
pub struct ResultCache {
    storage: Arc<dyn LocalStorage>,
}

impl ResultCache {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    /// Replace the stored recipes.
    pub fn write(&self, recipes: &[Recipe]) -> Result<()> {
        let raw = serde_json::to_string(recipes).map_err(|e| ClientError::Storage(e.to_string()))?;
        self.storage.set(GENERATED_RECIPES_KEY, &raw)?;
        tracing::debug!(count = recipes.len(), "Generated recipes cached");
        Ok(())
    }

    /// Read the stored recipes.
    ///
    /// Unreadable or corrupt entries count as a miss.
    pub fn read(&self) -> std::result::Result<Vec<Recipe>, CacheMiss> {
        let raw = match self.storage.get(GENERATED_RECIPES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Err(CacheMiss),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read generated recipes");
                return Err(CacheMiss);
            }
        };

        serde_json::from_str(&raw).map_err(|e| {
            tracing::warn!(error = %e, "Discarding corrupt generated recipes");
            CacheMiss
        })
    }
}
