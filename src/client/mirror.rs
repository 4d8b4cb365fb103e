// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-readable mirror of the signed-in user's profile.
//!
//! The mirror is a cache of what the gateway last confirmed, kept for one
//! day so a reload can skip the verify round trip. It is never proof of a
//! session on its own.

use crate::client::error::{ClientError, Result};
use crate::client::storage::LocalStorage;
use crate::models::UserProfile;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Storage key of the mirror, matching the `user` cookie name.
pub const USER_MIRROR_KEY: &str = "user";

/// How long a mirrored profile is trusted.
pub const MIRROR_TTL_DAYS: i64 = 1;

#[derive(Serialize, Deserialize)]
struct MirrorEntry {
    profile: UserProfile,
    expires_at: DateTime<Utc>,
}

/// Expiring profile mirror.
#[derive(Clone)]
pub struct ProfileMirror {
    storage: Arc<dyn LocalStorage>,
}

impl ProfileMirror {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    /// Mirrored profile, if present and not expired.
    pub fn read(&self) -> Option<UserProfile> {
        self.read_at(Utc::now())
    }

    pub fn read_at(&self, now: DateTime<Utc>) -> Option<UserProfile> {
        let raw = match self.storage.get(USER_MIRROR_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read profile mirror");
                return None;
            }
        };

        let entry: MirrorEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring corrupt profile mirror");
                return None;
            }
        };

        (entry.expires_at > now).then_some(entry.profile)
    }

    /// Mirror a confirmed profile for the next day.
    pub fn write(&self, profile: &UserProfile) -> Result<()> {
        self.write_at(profile, Utc::now())
    }

    pub fn write_at(&self, profile: &UserProfile, now: DateTime<Utc>) -> Result<()> {
        let entry = MirrorEntry {
            profile: profile.clone(),
            expires_at: now + Duration::days(MIRROR_TTL_DAYS),
        };
        let raw = serde_json::to_string(&entry).map_err(|e| ClientError::Storage(e.to_string()))?;
        self.storage.set(USER_MIRROR_KEY, &raw)
    }

    pub fn clear(&self) -> Result<()> {
        self.storage.remove(USER_MIRROR_KEY)
    }
}
