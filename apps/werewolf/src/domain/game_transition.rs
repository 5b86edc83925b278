use serde::Serialize;

use crate::domain::roles::Team;
use crate::domain::state::{GameState, Phase, PlayerId};

/// The slice of state transitions are derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLifecycleView {
    pub phase: Phase,
    pub turn: Option<PlayerId>,
    pub alive: Vec<PlayerId>,
    pub winner: Option<Team>,
}

impl GameLifecycleView {
    pub fn of(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            turn: state.turn,
            alive: state.alive().map(|p| p.id).collect(),
            winner: state.winner,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameTransition {
    /// Edge-triggered: the machine entered a different phase.
    PhaseChanged { from: Phase, to: Phase },

    /// Edge-triggered: the turn became a specific player.
    TurnBecame { player_id: PlayerId },

    /// Edge-triggered: a player went from alive to dead.
    PlayerDied { player_id: PlayerId },

    /// Edge-triggered: a winner was decided.
    GameEnded { winner: Team },
}

/// Derive domain transitions from before/after lifecycle state.
pub fn derive_game_transitions(
    before: &GameLifecycleView,
    after: &GameLifecycleView,
) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    // 1. Deaths, ascending id
    for id in before.alive.iter().filter(|id| !after.alive.contains(id)) {
        transitions.push(GameTransition::PlayerDied { player_id: *id });
    }

    // 2. Phase change
    if before.phase != after.phase {
        transitions.push(GameTransition::PhaseChanged {
            from: before.phase,
            to: after.phase,
        });
    }

    // 3. Turn change
    if let Some(player_id) = after.turn {
        if before.turn != Some(player_id) {
            transitions.push(GameTransition::TurnBecame { player_id });
        }
    }

    // 4. Game end
    if let (None, Some(winner)) = (before.winner, after.winner) {
        transitions.push(GameTransition::GameEnded { winner });
    }

    transitions
}
