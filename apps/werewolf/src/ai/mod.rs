//! Computer player module - the decision collaborator seam.
//!
//! This module provides:
//! - `DecisionMaker` trait for different implementations
//! - `RandomDecider`: random legal choices (seedable for tests)
//! - `SilentDecider`: never answers, so every decision falls back
//! - answer validation and fallback substitution

mod config;
pub mod fallback;
mod random;
pub mod registry;
mod silent;
mod trait_def;

use std::sync::Arc;

pub use config::AiConfig;
pub use fallback::{fallback_choice, validate_choice, FALLBACK_REASON, FALLBACK_SPEECH};
pub use random::RandomDecider;
pub use silent::SilentDecider;
pub use trait_def::{ActionKind, AiError, DecisionMaker, DecisionRequest, TargetChoice};

/// Create a decision maker from a registry name and config.
///
/// Returns `None` if the name is unrecognized.
pub fn create_decider(name: &str, config: &AiConfig) -> Option<Arc<dyn DecisionMaker>> {
    registry::by_name(name).map(|factory| (factory.make)(config.seed()))
}
