// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client core used by UI shells.
//!
//! Everything a view needs is reachable from [`AppContext`], which the shell
//! builds once and passes down explicitly.

pub mod error;
pub mod gateway;
pub mod mirror;
pub mod orchestrator;
pub mod result_cache;
pub mod selection;
pub mod session;
pub mod storage;

pub use error::{ClientError, Result};
pub use gateway::{AuthApi, GatewayClient, RecipeApi, Registration};
pub use mirror::ProfileMirror;
pub use orchestrator::{GenerationEvent, GenerationOrchestrator, GenerationState, ReadyNotification};
pub use result_cache::{CacheMiss, ResultCache};
pub use selection::{IngredientSelection, SelectionError, MAX_SELECTED};
pub use session::{Navigation, SessionManager, SessionState};
pub use storage::{FileStorage, LocalStorage, MemoryStorage};

use std::sync::Arc;
use std::time::Duration;

/// Client settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub gateway_url: String,
    /// Rotation period of the pending status message.
    pub status_interval: Duration,
    /// Lifetime of the "recipes ready" notification.
    pub notification_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            gateway_url: "http://localhost:3000".to_string(),
            status_interval: orchestrator::STATUS_INTERVAL,
            notification_ttl: orchestrator::NOTIFICATION_TTL,
        }
    }
}

impl ClientConfig {
    pub fn new(gateway_url: impl Into<String>) -> Self {
        Self {
            gateway_url: gateway_url.into(),
            ..Self::default()
        }
    }
}

/// Application context threaded through the views.
pub struct AppContext<C: AuthApi + RecipeApi = GatewayClient> {
    pub api: Arc<C>,
    pub session: SessionManager<C>,
    pub generation: GenerationOrchestrator<C>,
    pub results: ResultCache,
}

impl AppContext<GatewayClient> {
    /// Connect to the gateway with the given local storage.
    pub fn connect(config: &ClientConfig, storage: Arc<dyn LocalStorage>) -> Result<Self> {
        let api = Arc::new(GatewayClient::new(config.gateway_url.clone())?);
        Ok(Self::with_api(api, config, storage))
    }
}

impl<C: AuthApi + RecipeApi> AppContext<C> {
    pub fn with_api(api: Arc<C>, config: &ClientConfig, storage: Arc<dyn LocalStorage>) -> Self {
        let results = ResultCache::new(storage.clone());
        let session = SessionManager::new(api.clone(), ProfileMirror::new(storage));
        let generation = GenerationOrchestrator::with_timing(
            api.clone(),
            results.clone(),
            config.status_interval,
            config.notification_ttl,
        );
        Self {
            api,
            session,
            generation,
            results,
        }
    }

    /// Guard for the dashboard area: settles the session once and says
    /// whether to stay or go to the login surface.
    pub async fn enter_dashboard(&mut self) -> Navigation {
        self.session.initialize().await
    }

    /// Log out, dropping any in-flight generation's visibility first.
    pub async fn logout(&mut self) -> Navigation {
        self.generation.close_modal();
        self.session.logout().await
    }
}
