//! How to register a decision maker
//!
//! 1) Implement `DecisionMaker` for your type in its module.
//! 2) Add an `AiFactory` entry to the static list with a stable `name` and `version`.
//! 3) Determinism: same seed, same decisions (where applicable).

use std::sync::Arc;

use crate::ai::{DecisionMaker, RandomDecider, SilentDecider};

/// Factory definition for constructing decision makers.
pub struct AiFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(seed: Option<u64>) -> Arc<dyn DecisionMaker>,
}

static AI_FACTORIES: &[AiFactory] = &[
    AiFactory {
        name: RandomDecider::NAME,
        version: RandomDecider::VERSION,
        make: make_random,
    },
    AiFactory {
        name: SilentDecider::NAME,
        version: SilentDecider::VERSION,
        make: make_silent,
    },
];

/// Returns the statically registered factories.
pub fn registered_ais() -> &'static [AiFactory] {
    AI_FACTORIES
}

/// Finds a registered factory by its name.
pub fn by_name(name: &str) -> Option<&'static AiFactory> {
    registered_ais().iter().find(|factory| factory.name == name)
}

fn make_random(seed: Option<u64>) -> Arc<dyn DecisionMaker> {
    Arc::new(RandomDecider::new(seed))
}

fn make_silent(_seed: Option<u64>) -> Arc<dyn DecisionMaker> {
    Arc::new(SilentDecider)
}
