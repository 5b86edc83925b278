//! Domain layer: pure game logic types and helpers.

pub mod actions;
pub mod awaiting;
pub mod cascade;
pub mod effects;
pub mod game_transition;
pub mod night;
pub mod player_view;
pub mod roles;
pub mod seed_derivation;
pub mod setup;
pub mod state;
pub mod turns;
pub mod voting;
pub mod win;

#[cfg(test)]
pub(crate) mod fixtures;
#[cfg(test)]
mod tests_actions;
#[cfg(test)]
mod tests_props_flow;
#[cfg(test)]
mod tests_props_rules;

// Re-exports for ergonomics
pub use actions::{apply_action, start_game, Action};
pub use awaiting::{awaiting, ActorKind, Awaiting, Task};
pub use cascade::{enter_phase, resolve_deaths, CascadeReport};
pub use effects::{Effect, Pacing, PauseKind};
pub use game_transition::{derive_game_transitions, GameLifecycleView, GameTransition};
pub use night::resolve_night;
pub use player_view::{PlayerView, VisiblePlayer};
pub use roles::{Personality, Role, Team, PLAYERS, STANDARD_ROLES};
pub use seed_derivation::{derive_fallback_seed, derive_setup_seed};
pub use setup::deal_roles;
pub use state::{
    GameLog, GameLogEntry, GameState, LogKind, NightActionData, Phase, Player, PlayerId,
    WitchPotions, WitchStep,
};
pub use voting::{tally_state, tally_votes, VoteOutcome};
pub use win::evaluate_winner;
