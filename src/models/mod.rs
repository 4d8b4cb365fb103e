// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Wire models shared by the gateway and the client.

pub mod inventory;
pub mod recipe;
pub mod user;

pub use inventory::{Inventory, InventoryItem};
pub use recipe::{GeneratedRecipes, Instruction, Recipe, RecipeIngredients, SavedRecipe, YoutubeVideo};
pub use user::{LoginResponse, UserProfile};
