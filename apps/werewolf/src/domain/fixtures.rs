//! Roster builders for domain unit tests.

use crate::domain::roles::{Personality, STANDARD_ROLES};
use crate::domain::state::{GameState, Phase, Player, PlayerId};

/// Nine computer players in standard deal order:
/// 1-3 Werewolf, 4-6 Villager, 7 Seer, 8 Witch, 9 Hunter.
pub fn standard_roster() -> Vec<Player> {
    STANDARD_ROLES
        .iter()
        .enumerate()
        .map(|(i, &role)| Player {
            id: (i + 1) as PlayerId,
            role,
            personality: Personality::ALL[i % Personality::ALL.len()],
            is_human: false,
            is_alive: true,
        })
        .collect()
}

/// Standard roster with the given seats marked human.
pub fn roster_with_humans(humans: &[PlayerId]) -> Vec<Player> {
    let mut players = standard_roster();
    for p in players.iter_mut() {
        p.is_human = humans.contains(&p.id);
    }
    players
}

pub fn kill(players: &mut [Player], ids: &[PlayerId]) {
    for p in players.iter_mut() {
        if ids.contains(&p.id) {
            p.is_alive = false;
        }
    }
}

/// State positioned at the given phase with a standard roster.
pub fn state_in(phase: Phase, humans: &[PlayerId]) -> GameState {
    let mut state = GameState::with_players(roster_with_humans(humans));
    state.phase = phase;
    state
}
