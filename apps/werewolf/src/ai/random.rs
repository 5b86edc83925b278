//! Random decision maker - makes random legal choices.
//!
//! [`RandomDecider`] is the reference implementation of
//! [`DecisionMaker`](super::DecisionMaker). It keeps its RNG behind a
//! [`std::sync::Mutex`] so decisions stay reproducible when seeded.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::prelude::*;

use super::trait_def::{ActionKind, AiError, DecisionMaker, DecisionRequest, TargetChoice};
use crate::domain::roles::Role;

const SAVE_CHANCE: f64 = 0.5;
const POISON_CHANCE: f64 = 0.2;

const LINES: &[&str] = &[
    "I have a bad feeling about Player {t}.",
    "Player {t} has been far too quiet.",
    "I think we should look closely at Player {t}.",
    "Player {t}, where were you last night?",
    "I trust Player {t}, for now.",
];

/// Decision maker that picks uniformly among legal targets.
///
/// Wolves never pick a known fellow wolf. The Seer prefers players not yet
/// inspected. The Witch saves half the time and
/// poisons a fifth of the time.
pub struct RandomDecider {
    /// Wrapped in `Mutex` because trait methods take `&self`.
    rng: Mutex<StdRng>,
}

impl RandomDecider {
    pub const NAME: &'static str = "random";
    pub const VERSION: &'static str = "1.0.0";

    /// `Some(seed)` for reproducible play, `None` for OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

#[async_trait]
impl DecisionMaker for RandomDecider {
    async fn choose_target(&self, request: &DecisionRequest) -> Result<TargetChoice, AiError> {
        let view = &request.view;
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;

        let candidates: Vec<_> = match (request.kind, view.my_role) {
            (ActionKind::Kill, Role::Werewolf) => {
                let pack = view.known_wolves();
                view.living_targets()
                    .into_iter()
                    .filter(|id| !pack.contains(id))
                    .collect()
            }
            (ActionKind::Check, Role::Seer) => {
                let seen = view.seer_findings.clone().unwrap_or_default();
                let fresh: Vec<_> = view
                    .living_targets()
                    .into_iter()
                    .filter(|id| !seen.contains_key(id))
                    .collect();
                if fresh.is_empty() {
                    view.living_targets()
                } else {
                    fresh
                }
            }
            _ => view.living_targets(),
        };

        let choice = match request.kind {
            ActionKind::Save => {
                let save = view.attacked.is_some() && rng.random_bool(SAVE_CHANCE);
                TargetChoice::new(save.then_some(view.attacked).flatten(), "Gut feeling.")
            }
            ActionKind::Poison if !rng.random_bool(POISON_CHANCE) => {
                TargetChoice::new(None, "Keeping the poison for later.")
            }
            _ => TargetChoice::new(
                candidates.choose(&mut *rng).copied(),
                "Random choice.",
            ),
        };
        Ok(choice)
    }

    async fn compose_speech(&self, request: &DecisionRequest) -> Result<String, AiError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;
        let target = request
            .view
            .living_targets()
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| AiError::InvalidResponse("nobody left to talk about".into()))?;
        let line = LINES
            .choose(&mut *rng)
            .ok_or_else(|| AiError::Internal("no speech lines".into()))?;
        Ok(line.replace("{t}", &target.to_string()))
    }
}
