// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User profile model.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Profile of the signed-in user as returned by the backend.
///
/// The verify handler only knows that a token exists, so it answers with an
/// empty object; every field therefore has a default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(default)]
pub struct UserProfile {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub gender: Option<String>,
}

/// Successful login: the bearer token plus the profile it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default_profile() {
        let profile: UserProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile, UserProfile::default());
    }

    #[test]
    fn test_backend_profile_parses() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "id": 7,
            "email": "cook@example.com",
            "name": "Asha",
            "gender": null
        }))
        .unwrap();
        assert_eq!(profile.id, 7);
        assert_eq!(profile.name, "Asha");
        assert!(profile.gender.is_none());
    }
}
