//! Validation of collaborator answers and the fallback substituted on failure.

use rand::prelude::*;

use super::trait_def::{ActionKind, AiError, TargetChoice};
use crate::domain::player_view::PlayerView;

pub const FALLBACK_REASON: &str = "Fallback random choice due to error.";
pub const FALLBACK_SPEECH: &str = "I have nothing to say right now.";

/// Check a collaborator's choice against what the acting player may do.
///
/// Targets must be living players other than the actor. A save may only name
/// the wolves' victim. `None` is accepted everywhere except `Check`.
pub fn validate_choice(
    kind: ActionKind,
    view: &PlayerView,
    choice: TargetChoice,
) -> Result<TargetChoice, AiError> {
    match (kind, choice.target) {
        (ActionKind::Check, None) => Err(AiError::InvalidResponse(
            "CHECK needs a target".to_string(),
        )),
        (ActionKind::Save, Some(t)) if view.attacked != Some(t) => Err(AiError::InvalidResponse(
            format!("cannot save player {t}; only the wolves' victim"),
        )),
        (ActionKind::Save, _) => Ok(choice),
        (_, Some(t)) if !view.living_targets().contains(&t) => Err(AiError::InvalidResponse(
            format!("player {t} is not a living target"),
        )),
        _ => Ok(choice),
    }
}

/// Deterministic-given-rng substitute for a failed decision.
///
/// A uniformly random living player other than the actor, except for the
/// Witch's potions, where the fallback declines so a failure never spends one.
pub fn fallback_choice<R: Rng + ?Sized>(
    kind: ActionKind,
    view: &PlayerView,
    rng: &mut R,
) -> TargetChoice {
    let target = match kind {
        ActionKind::Save | ActionKind::Poison => None,
        _ => view.living_targets().choose(rng).copied(),
    };
    TargetChoice::new(target, FALLBACK_REASON)
}

/// Speech must be non-blank.
pub fn validate_speech(text: String) -> Result<String, AiError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AiError::InvalidResponse("empty speech".to_string()));
    }
    Ok(trimmed.to_string())
}
