// Core algorithm exports
pub mod filters;
pub mod normalize;
pub mod recommender;
pub mod scoring;
pub mod session;

pub use filters::{apply_filters, filter_compatible, is_compatible, matches_filters};
pub use normalize::{dedup_by_id, to_recipe};
pub use recommender::{Recommendation, RecommendError, Recommender};
pub use scoring::{calculate_recommendation_score, score_recipes};
pub use session::{
    RecommendationSlot, RecommendationState, RequestToken, SessionStore, SharedSlot,
    LOAD_FAILED_MESSAGE,
};
