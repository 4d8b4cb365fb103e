// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lifecycle of one recipe-generation request.
//!
//! ```text
//! Idle -> Pending -> CompletedVisible -> Idle                  (navigate or close)
//!                 -> CancellationRequested -> Aborted           (abort won)
//!                                          -> CompletedHidden   (response won)
//!                 -> Failed
//! CompletedHidden -> Idle                     (viewed or expired after 60s)
//! ```
//!
//! The request runs in a spawned task that races the network call against a
//! cancellation token and reports back over a channel. Every transition is
//! applied by the owner through `&mut self`; nothing else touches the state.
//! When the response and the cancellation are both ready, the response wins.

use crate::client::error::ClientError;
use crate::client::gateway::RecipeApi;
use crate::client::result_cache::{CacheMiss, ResultCache};
use crate::client::selection::IngredientSelection;
use crate::models::Recipe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// How long the "recipes ready" notification stays up.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(60);

/// How often the pending status message changes.
pub const STATUS_INTERVAL: Duration = Duration::from_secs(3);

/// Cosmetic messages cycled while a request is pending.
pub const STATUS_MESSAGES: &[&str] = &[
    "Checking your pantry...",
    "Pairing ingredients...",
    "Asking the chef for ideas...",
    "Writing down the steps...",
    "Working out nutrition...",
    "Plating up your recipes...",
];

/// Message for a status ticker after `elapsed` time pending.
pub fn status_message_at(elapsed: Duration, interval: Duration) -> &'static str {
    let interval_ms = interval.as_millis().max(1);
    let index = (elapsed.as_millis() / interval_ms) as usize % STATUS_MESSAGES.len();
    STATUS_MESSAGES[index]
}

/// Shown when a response arrives after the modal was closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyNotification {
    pub recipe_count: usize,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationState {
    Idle,
    Pending {
        attempt: u64,
        ingredients: Vec<String>,
        started_at: Instant,
    },
    /// The modal was closed; waiting for the task to settle.
    CancellationRequested { attempt: u64 },
    /// Result arrived while the modal was open.
    CompletedVisible { recipes: Vec<Recipe> },
    /// Result arrived after the modal was closed.
    CompletedHidden { notification: ReadyNotification },
    Aborted,
    /// Error shown inline until the next attempt.
    Failed { message: String },
}

/// What the UI should react to after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationEvent {
    Completed { recipes: Vec<Recipe> },
    Ready(ReadyNotification),
    Aborted,
    Failed { message: String },
}

enum AttemptResult {
    Completed(Vec<Recipe>),
    Aborted,
    Failed(ClientError),
}

/// The request task ended without reporting, which only happens if it
/// panicked.
fn task_lost() -> AttemptResult {
    tracing::error!("Recipe generation task ended without a result");
    AttemptResult::Failed(ClientError::NetworkFailure(
        "Recipe generation stopped unexpectedly".to_string(),
    ))
}

/// Drives generation attempts for one UI surface.
pub struct GenerationOrchestrator<R: RecipeApi> {
    api: Arc<R>,
    cache: ResultCache,
    state: GenerationState,
    next_attempt: u64,
    cancel: Option<CancellationToken>,
    /// Outcome of the in-flight attempt; each attempt gets its own channel.
    outcome: Option<oneshot::Receiver<AttemptResult>>,
    status_interval: Duration,
    notification_ttl: Duration,
}

impl<R: RecipeApi> GenerationOrchestrator<R> {
    pub fn new(api: Arc<R>, cache: ResultCache) -> Self {
        Self::with_timing(api, cache, STATUS_INTERVAL, NOTIFICATION_TTL)
    }

    pub fn with_timing(
        api: Arc<R>,
        cache: ResultCache,
        status_interval: Duration,
        notification_ttl: Duration,
    ) -> Self {
        Self {
            api,
            cache,
            state: GenerationState::Idle,
            next_attempt: 1,
            cancel: None,
            outcome: None,
            status_interval,
            notification_ttl,
        }
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    /// A request is in flight (pending or being cancelled).
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self.state,
            GenerationState::Pending { .. } | GenerationState::CancellationRequested { .. }
        )
    }

    /// Whether the generate action may be offered. It is hidden only while
    /// a request is in flight.
    pub fn is_generate_action_visible(&self) -> bool {
        !self.is_in_flight()
    }

    /// Inline error for the modal, if the last attempt failed.
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            GenerationState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Pending notification, if any.
    pub fn notification(&self) -> Option<&ReadyNotification> {
        match &self.state {
            GenerationState::CompletedHidden { notification } => Some(notification),
            _ => None,
        }
    }

    /// Current status message while pending.
    pub fn status_message(&self) -> Option<&'static str> {
        match &self.state {
            GenerationState::Pending { started_at, .. } => {
                Some(status_message_at(started_at.elapsed(), self.status_interval))
            }
            _ => None,
        }
    }

    /// Issue a generation request for the selection.
    ///
    /// The selection is validated before anything is sent. Starting while
    /// a request is in flight is refused; starting while a notification is
    /// up, or while a visible result was not yet opened, replaces it.
    pub fn start(&mut self, selection: &IngredientSelection) -> Result<(), ClientError> {
        if !self.is_generate_action_visible() {
            return Err(ClientError::AlreadyPending);
        }
        selection.check()?;

        let attempt = self.next_attempt;
        self.next_attempt += 1;

        let ingredients = selection.items().to_vec();
        let cancel = CancellationToken::new();
        self.cancel = Some(cancel.clone());

        let api = self.api.clone();
        let (tx, rx) = oneshot::channel();
        self.outcome = Some(rx);
        let request = ingredients.clone();
        tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                response = api.generate(&request) => match response {
                    Ok(recipes) => AttemptResult::Completed(recipes),
                    Err(ClientError::UserCancelled) => AttemptResult::Aborted,
                    Err(e) => AttemptResult::Failed(e),
                },
                _ = cancel.cancelled() => AttemptResult::Aborted,
            };
            // Receiver is gone only if the orchestrator was dropped
            let _ = tx.send(result);
        });

        tracing::info!(attempt, count = ingredients.len(), "Recipe generation started");
        self.state = GenerationState::Pending {
            attempt,
            ingredients,
            started_at: Instant::now(),
        };
        Ok(())
    }

    /// The triggering modal was closed. Requests cancellation of a pending
    /// attempt; a result that still arrives is kept.
    ///
    /// Closing over a visible result drops back to idle; the result is
    /// already cached.
    pub fn close_modal(&mut self) {
        let attempt = match self.state {
            GenerationState::Pending { attempt, .. } => attempt,
            GenerationState::CompletedVisible { .. } => {
                self.state = GenerationState::Idle;
                return;
            }
            _ => return,
        };

        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
        tracing::debug!(attempt, "Cancellation requested");
        self.state = GenerationState::CancellationRequested { attempt };
    }

    /// Wait for the in-flight attempt to settle and apply its outcome.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_event(&mut self) -> Option<GenerationEvent> {
        if !self.is_in_flight() {
            return None;
        }
        let rx = self.outcome.take()?;
        let result = rx.await.unwrap_or_else(|_| task_lost());
        self.apply(result)
    }

    /// Apply an outcome that is already available, without waiting.
    pub fn try_next_event(&mut self) -> Option<GenerationEvent> {
        if !self.is_in_flight() {
            return None;
        }
        let mut rx = self.outcome.take()?;
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => {
                self.outcome = Some(rx);
                return None;
            }
            Err(oneshot::error::TryRecvError::Closed) => task_lost(),
        };
        self.apply(result)
    }

    fn apply(&mut self, result: AttemptResult) -> Option<GenerationEvent> {
        let (current, modal_open) = match self.state {
            GenerationState::Pending { attempt, .. } => (attempt, true),
            GenerationState::CancellationRequested { attempt } => (attempt, false),
            _ => return None,
        };
        self.cancel = None;

        match (result, modal_open) {
            (AttemptResult::Completed(recipes), true) => {
                self.store(&recipes);
                tracing::info!(attempt = current, count = recipes.len(), "Recipes generated");
                self.state = GenerationState::CompletedVisible {
                    recipes: recipes.clone(),
                };
                Some(GenerationEvent::Completed { recipes })
            }
            (AttemptResult::Completed(recipes), false) => {
                self.store(&recipes);
                let notification = ReadyNotification {
                    recipe_count: recipes.len(),
                    expires_at: Instant::now() + self.notification_ttl,
                };
                tracing::info!(attempt = current, count = recipes.len(), "Recipes ready after modal closed");
                self.state = GenerationState::CompletedHidden {
                    notification: notification.clone(),
                };
                Some(GenerationEvent::Ready(notification))
            }
            (AttemptResult::Failed(e), true) => {
                tracing::warn!(attempt = current, error = %e, "Recipe generation failed");
                let message = e.to_string();
                self.state = GenerationState::Failed {
                    message: message.clone(),
                };
                Some(GenerationEvent::Failed { message })
            }
            // Errors after cancellation are part of the abort, not a fault
            (AttemptResult::Failed(_), false) | (AttemptResult::Aborted, _) => {
                tracing::debug!(attempt = current, "Recipe generation aborted");
                self.state = GenerationState::Aborted;
                Some(GenerationEvent::Aborted)
            }
        }
    }

    fn store(&self, recipes: &[Recipe]) {
        if let Err(e) = self.cache.write(recipes) {
            tracing::error!(error = %e, "Failed to cache generated recipes");
        }
    }

    /// Leave the visible result for the recipe view.
    pub fn navigate_to_result(&mut self) -> Result<Vec<Recipe>, CacheMiss> {
        if matches!(self.state, GenerationState::CompletedVisible { .. }) {
            self.state = GenerationState::Idle;
        }
        self.cache.read()
    }

    /// The user tapped "view" on the notification.
    pub fn view_notification(&mut self) -> Result<Vec<Recipe>, CacheMiss> {
        if matches!(self.state, GenerationState::CompletedHidden { .. }) {
            self.state = GenerationState::Idle;
        }
        self.cache.read()
    }

    /// Drop the notification if it has expired at `now`. Returns whether it
    /// was dropped.
    pub fn expire_notification(&mut self, now: Instant) -> bool {
        let expired = self.notification().is_some_and(|n| now >= n.expires_at);
        if expired {
            self.state = GenerationState::Idle;
        }
        expired
    }

    /// Sleep until the current notification expires, then drop it.
    pub async fn expire_notification_when_due(&mut self) -> bool {
        let Some(deadline) = self.notification().map(|n| n.expires_at) else {
            return false;
        };
        tokio::time::sleep_until(deadline).await;
        self.expire_notification(Instant::now())
    }

    /// Clear an inline error, an abort or an unopened result back to idle.
    pub fn reset(&mut self) {
        if matches!(
            self.state,
            GenerationState::Failed { .. }
                | GenerationState::Aborted
                | GenerationState::CompletedVisible { .. }
        ) {
            self.state = GenerationState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::error::Result;
    use crate::client::storage::MemoryStorage;
    use crate::models::RecipeIngredients;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers after `delay` with a fixed result.
    struct DelayedApi {
        delay: Duration,
        result: Result<Vec<Recipe>>,
        calls: AtomicUsize,
    }

    impl DelayedApi {
        fn ok(delay: Duration, recipes: Vec<Recipe>) -> Arc<Self> {
            Arc::new(Self {
                delay,
                result: Ok(recipes),
                calls: AtomicUsize::new(0),
            })
        }

        fn err(delay: Duration, err: ClientError) -> Arc<Self> {
            Arc::new(Self {
                delay,
                result: Err(err),
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl RecipeApi for DelayedApi {
        async fn generate(&self, _ingredients: &[String]) -> Result<Vec<Recipe>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.result.clone()
        }
    }

    fn recipe(name: &str) -> Recipe {
        Recipe {
            name: name.to_string(),
            ingredients: RecipeIngredients {
                available: vec!["egg".to_string(), "tomato".to_string()],
                needed: vec!["salt".to_string()],
            },
            instructions: Vec::new(),
            nutrition: None,
            prep_time: "10 mins".to_string(),
            cook_time: "20 mins".to_string(),
            total_time: "30 mins".to_string(),
            servings: 2,
            youtube_videos: Vec::new(),
        }
    }

    fn setup(api: Arc<DelayedApi>) -> (GenerationOrchestrator<DelayedApi>, ResultCache) {
        let cache = ResultCache::new(Arc::new(MemoryStorage::new()));
        (GenerationOrchestrator::new(api, cache.clone()), cache)
    }

    fn selection() -> IngredientSelection {
        ["egg", "tomato"].into_iter().collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_with_modal_open() {
        let api = DelayedApi::ok(Duration::from_secs(2), vec![recipe("Tomato Egg Curry")]);
        let (mut orchestrator, cache) = setup(api);

        orchestrator.start(&selection()).unwrap();
        assert!(!orchestrator.is_generate_action_visible());

        let event = orchestrator.next_event().await.unwrap();
        assert!(matches!(event, GenerationEvent::Completed { ref recipes } if recipes.len() == 1));
        assert!(matches!(orchestrator.state(), GenerationState::CompletedVisible { .. }));

        let recipes = orchestrator.navigate_to_result().unwrap();
        assert_eq!(recipes[0].name, "Tomato Egg Curry");
        assert_eq!(cache.read().unwrap(), recipes);
        assert_eq!(orchestrator.state(), &GenerationState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closing_over_visible_result_allows_new_attempt() {
        let api = DelayedApi::ok(Duration::from_millis(50), vec![recipe("Tomato Egg Curry")]);
        let (mut orchestrator, cache) = setup(api.clone());

        orchestrator.start(&selection()).unwrap();
        orchestrator.next_event().await.unwrap();
        assert!(matches!(orchestrator.state(), GenerationState::CompletedVisible { .. }));
        assert!(orchestrator.is_generate_action_visible());

        orchestrator.close_modal();
        assert_eq!(orchestrator.state(), &GenerationState::Idle);
        assert_eq!(cache.read().unwrap()[0].name, "Tomato Egg Curry");

        orchestrator.start(&selection()).unwrap();
        assert!(matches!(
            orchestrator.next_event().await,
            Some(GenerationEvent::Completed { .. })
        ));
        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_over_unopened_result() {
        let api = DelayedApi::ok(Duration::from_millis(50), vec![recipe("Dal")]);
        let (mut orchestrator, _) = setup(api.clone());

        orchestrator.start(&selection()).unwrap();
        orchestrator.next_event().await.unwrap();

        orchestrator.start(&selection()).unwrap();
        assert!(orchestrator.is_in_flight());
        orchestrator.next_event().await.unwrap();
        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    }

    /// Request task that dies instead of answering.
    struct PanickingApi;

    impl RecipeApi for PanickingApi {
        async fn generate(&self, _ingredients: &[String]) -> Result<Vec<Recipe>> {
            tokio::time::sleep(Duration::from_millis(10)).await;
            panic!("request task crashed");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_crashed_request_task_fails_attempt() {
        let cache = ResultCache::new(Arc::new(MemoryStorage::new()));
        let mut orchestrator = GenerationOrchestrator::new(Arc::new(PanickingApi), cache.clone());

        orchestrator.start(&selection()).unwrap();
        let event = orchestrator.next_event().await.unwrap();

        assert!(matches!(event, GenerationEvent::Failed { .. }));
        assert!(orchestrator.is_generate_action_visible());
        assert!(cache.read().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_before_response_leaves_cache_empty() {
        let api = DelayedApi::ok(Duration::from_secs(30), vec![recipe("Dal")]);
        let (mut orchestrator, cache) = setup(api);

        orchestrator.start(&selection()).unwrap();
        orchestrator.close_modal();
        assert!(matches!(
            orchestrator.state(),
            GenerationState::CancellationRequested { .. }
        ));

        assert_eq!(orchestrator.next_event().await, Some(GenerationEvent::Aborted));
        assert_eq!(orchestrator.state(), &GenerationState::Aborted);
        assert!(orchestrator.error_message().is_none());
        assert!(cache.read().is_err());
        assert!(orchestrator.is_generate_action_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_success_after_close_notifies() {
        let api = DelayedApi::ok(Duration::from_millis(100), vec![recipe("Shakshuka")]);
        let (mut orchestrator, cache) = setup(api);

        orchestrator.start(&selection()).unwrap();
        // Response lands before the UI gets around to the close
        tokio::time::sleep(Duration::from_millis(200)).await;
        orchestrator.close_modal();

        let event = orchestrator.next_event().await.unwrap();
        let GenerationEvent::Ready(notification) = event else {
            panic!("expected ready notification, got {event:?}");
        };
        assert_eq!(notification.recipe_count, 1);
        assert_eq!(cache.read().unwrap()[0].name, "Shakshuka");
        assert!(orchestrator.notification().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_notification_expires_after_sixty_seconds() {
        let api = DelayedApi::ok(Duration::from_millis(100), vec![recipe("Shakshuka")]);
        let (mut orchestrator, cache) = setup(api);

        orchestrator.start(&selection()).unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
        orchestrator.close_modal();
        orchestrator.next_event().await.unwrap();

        let shown_at = Instant::now();
        assert!(!orchestrator.expire_notification(shown_at + Duration::from_secs(59)));

        assert!(orchestrator.expire_notification_when_due().await);
        assert!(shown_at.elapsed() >= NOTIFICATION_TTL);
        assert_eq!(orchestrator.state(), &GenerationState::Idle);
        // Expiry hides the notification; the result stays cached
        assert!(cache.read().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_view_notification_returns_cached_result() {
        let api = DelayedApi::ok(Duration::from_millis(100), vec![recipe("Shakshuka")]);
        let (mut orchestrator, _) = setup(api);

        orchestrator.start(&selection()).unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
        orchestrator.close_modal();
        orchestrator.next_event().await.unwrap();

        let recipes = orchestrator.view_notification().unwrap();
        assert_eq!(recipes[0].name, "Shakshuka");
        assert_eq!(orchestrator.state(), &GenerationState::Idle);
        assert!(orchestrator.notification().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_shown_inline_and_not_cached() {
        let api = DelayedApi::err(
            Duration::from_millis(50),
            ClientError::UpstreamFailure("Failed to generate recipes".to_string()),
        );
        let (mut orchestrator, cache) = setup(api);

        orchestrator.start(&selection()).unwrap();
        let event = orchestrator.next_event().await.unwrap();

        assert_eq!(
            event,
            GenerationEvent::Failed {
                message: "Failed to generate recipes".to_string()
            }
        );
        assert_eq!(orchestrator.error_message(), Some("Failed to generate recipes"));
        assert!(cache.read().is_err());

        orchestrator.reset();
        assert_eq!(orchestrator.state(), &GenerationState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_after_close_is_suppressed() {
        let api = DelayedApi::err(
            Duration::from_millis(100),
            ClientError::NetworkFailure("connection reset".to_string()),
        );
        let (mut orchestrator, _) = setup(api);

        orchestrator.start(&selection()).unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
        orchestrator.close_modal();

        assert_eq!(orchestrator.next_event().await, Some(GenerationEvent::Aborted));
        assert!(orchestrator.error_message().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_one_pending_request() {
        let api = DelayedApi::ok(Duration::from_secs(5), vec![recipe("Dal")]);
        let (mut orchestrator, _) = setup(api.clone());

        orchestrator.start(&selection()).unwrap();
        assert_eq!(
            orchestrator.start(&selection()),
            Err(ClientError::AlreadyPending)
        );

        orchestrator.next_event().await.unwrap();
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_selection_sends_nothing() {
        let api = DelayedApi::ok(Duration::from_millis(10), Vec::new());
        let (mut orchestrator, _) = setup(api.clone());

        let too_many: IngredientSelection =
            ["egg", "tomato", "onion", "rice", "milk", "bread"].into_iter().collect();
        assert!(matches!(
            orchestrator.start(&too_many),
            Err(ClientError::ValidationFailure(_))
        ));
        assert!(orchestrator.start(&IngredientSelection::new()).is_err());

        tokio::task::yield_now().await;
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert_eq!(orchestrator.state(), &GenerationState::Idle);
        assert_eq!(orchestrator.next_event().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_message_rotates_while_pending() {
        let api = DelayedApi::ok(Duration::from_secs(60), Vec::new());
        let (mut orchestrator, _) = setup(api);

        assert!(orchestrator.status_message().is_none());
        orchestrator.start(&selection()).unwrap();
        assert_eq!(orchestrator.status_message(), Some(STATUS_MESSAGES[0]));

        tokio::time::advance(STATUS_INTERVAL).await;
        assert_eq!(orchestrator.status_message(), Some(STATUS_MESSAGES[1]));
    }

    #[test]
    fn test_status_message_wraps() {
        let n = STATUS_MESSAGES.len() as u32;
        assert_eq!(
            status_message_at(STATUS_INTERVAL * n, STATUS_INTERVAL),
            STATUS_MESSAGES[0]
        );
    }
}
