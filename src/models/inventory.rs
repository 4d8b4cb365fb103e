// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Pantry inventory grouped by category.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One pantry item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Inventory as served by the backend: category name to its items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory(pub BTreeMap<String, Vec<InventoryItem>>);

impl Inventory {
    /// Category names in display order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Items of one category, empty if the category is unknown.
    pub fn items(&self, category: &str) -> &[InventoryItem] {
        self.0.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Category that holds an item with this name.
    pub fn category_of(&self, item_name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, items)| items.iter().any(|item| item.name == item_name))
            .map(|(category, _)| category.as_str())
    }
}
