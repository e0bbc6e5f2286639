use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::models::Recipe;

/// Message shown when a recommendation computation fails
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load recommendations. Please try again later.";

/// Identity of one recommendation computation
///
/// Tokens handed out by a slot strictly increase, so a later request always
/// supersedes an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestToken(u64);

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Displayed state of a recommendation slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RecommendationState {
    Idle,
    Loading,
    Ready { recipes: Vec<Recipe> },
    Failed { message: String },
}

/// Single result slot with a stale-result guard
///
/// `begin` starts a new computation and invalidates any in-flight one.
/// `complete` only applies the outcome of the most recent computation;
/// superseded outcomes are dropped (last write wins).
#[derive(Debug, Clone)]
pub struct RecommendationSlot {
    latest: u64,
    state: RecommendationState,
}

impl Default for RecommendationSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationSlot {
    pub fn new() -> Self {
        Self {
            latest: 0,
            state: RecommendationState::Idle,
        }
    }

    /// Start a new computation and enter the loading state
    pub fn begin(&mut self) -> RequestToken {
        self.latest += 1;
        self.state = RecommendationState::Loading;
        RequestToken(self.latest)
    }

    /// Whether `token` still identifies the most recent computation
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    /// Apply a finished computation. Returns false if it was superseded.
    ///
    /// Failures discard the whole result set.
    pub fn complete<E>(&mut self, token: RequestToken, result: Result<Vec<Recipe>, E>) -> bool
    where
        E: std::fmt::Display,
    {
        if !self.is_current(token) {
            tracing::debug!(token = %token, latest = self.latest, "Discarding stale recommendation result");
            return false;
        }

        self.state = match result {
            Ok(recipes) => RecommendationState::Ready { recipes },
            Err(e) => {
                tracing::warn!(token = %token, error = %e, "Recommendation computation failed");
                RecommendationState::Failed {
                    message: LOAD_FAILED_MESSAGE.to_string(),
                }
            }
        };
        true
    }

    pub fn state(&self) -> &RecommendationState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RecommendationState::Loading)
    }

    /// Recipes currently on display. Empty while loading or after a failure.
    pub fn recipes(&self) -> &[Recipe] {
        match &self.state {
            RecommendationState::Ready { recipes } => recipes.as_slice(),
            _ => &[],
        }
    }
}

/// Slot handle shared between the request computing into it and readers
pub type SharedSlot = Arc<Mutex<RecommendationSlot>>;

/// Latest recommendation slot per profile id
///
/// Holds at most `max_profiles` slots and forgets a profile once it has been
/// idle for the configured duration. A request keeps its own handle, so an
/// eviction mid-computation only drops that outcome.
#[derive(Clone)]
pub struct SessionStore {
    slots: Cache<String, SharedSlot>,
}

impl SessionStore {
    pub fn new(max_profiles: u64, idle: Duration) -> Self {
        Self {
            slots: Cache::builder()
                .max_capacity(max_profiles)
                .time_to_idle(idle)
                .build(),
        }
    }

    /// Slot for `profile_id`, created on first use
    pub async fn slot(&self, profile_id: &str) -> SharedSlot {
        self.slots
            .get_with(profile_id.to_string(), async {
                Arc::new(Mutex::new(RecommendationSlot::new()))
            })
            .await
    }

    /// Slot for `profile_id` if one is still held
    pub async fn get(&self, profile_id: &str) -> Option<SharedSlot> {
        self.slots.get(profile_id).await
    }

    /// Number of profiles held, after pending evictions are applied
    pub async fn profile_count(&self) -> u64 {
        self.slots.run_pending_tasks().await;
        self.slots.entry_count()
    }
}
