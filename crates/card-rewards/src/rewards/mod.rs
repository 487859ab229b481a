//! Deterministic ranking of a user's cards for a purchase category.
//!
//! Raw merchant type tags (as returned by a places lookup) are resolved to stored merchant
//! categories, every owned catalog card is scored against them with the `other` category
//! as fallback, and the results are ordered from best to worst value.

pub mod engine;
pub mod mapping;
pub mod resolver;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use engine::{CardBenefit, RewardType, ScoringEngine};
pub use mapping::canonical_category_for;
pub use resolver::{resolve_categories, RequestedTypes, ResolvedCategories};
pub use router::benefits_router;
pub use service::{RecommendationError, RecommendationService};
