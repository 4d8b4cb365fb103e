// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ingredient selection for recipe generation.

use crate::models::Inventory;
use std::collections::BTreeMap;

/// Most ingredients a single generation request may use.
pub const MAX_SELECTED: usize = 5;

/// Why a selection cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Select at least one ingredient")]
    Empty,

    #[error("You can select maximum {max} ingredients ({0} selected)", max = MAX_SELECTED)]
    TooMany(usize),
}

/// Ordered set of selected item names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientSelection {
    items: Vec<String>,
}

impl IngredientSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the item if absent, remove it if present. Returns whether it is
    /// selected afterwards.
    pub fn toggle(&mut self, name: &str) -> bool {
        if let Some(pos) = self.items.iter().position(|item| item == name) {
            self.items.remove(pos);
            false
        } else {
            self.items.push(name.to_string());
            true
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| item == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Selected names in selection order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Check the selection can be submitted.
    pub fn check(&self) -> Result<(), SelectionError> {
        match self.items.len() {
            0 => Err(SelectionError::Empty),
            n if n > MAX_SELECTED => Err(SelectionError::TooMany(n)),
            _ => Ok(()),
        }
    }

    pub fn is_generate_enabled(&self) -> bool {
        self.check().is_ok()
    }

    /// Warning to show next to the generate action, if any.
    pub fn warning(&self) -> Option<String> {
        match self.check() {
            Err(err @ SelectionError::TooMany(_)) => Some(err.to_string()),
            _ => None,
        }
    }

    /// Selected items grouped under their inventory category, for the
    /// confirmation summary. Items missing from the inventory are listed
    /// under "Others".
    pub fn grouped_by_category<'a>(&'a self, inventory: &'a Inventory) -> BTreeMap<&'a str, Vec<&'a str>> {
        let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for item in &self.items {
            let category = inventory.category_of(item).unwrap_or("Others");
            groups.entry(category).or_default().push(item.as_str());
        }
        groups
    }
}

impl<S: Into<String>> FromIterator<S> for IngredientSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Self::new();
        for name in iter {
            let name = name.into();
            if !selection.contains(&name) {
                selection.items.push(name);
            }
        }
        selection
    }
}
