//! Roster builders for integration tests.

use werewolf::domain::roles::{Personality, STANDARD_ROLES};
use werewolf::domain::state::{GameState, Phase, Player, PlayerId};

/// Standard deal order with `humans` marked human:
/// 1-3 Werewolf, 4-6 Villager, 7 Seer, 8 Witch, 9 Hunter.
pub fn roster_with_humans(humans: &[PlayerId]) -> Vec<Player> {
    STANDARD_ROLES
        .iter()
        .enumerate()
        .map(|(i, &role)| {
            let id = (i + 1) as PlayerId;
            Player {
                id,
                role,
                personality: Personality::ALL[i % Personality::ALL.len()],
                is_human: humans.contains(&id),
                is_alive: true,
            }
        })
        .collect()
}

pub fn kill(players: &mut [Player], ids: &[PlayerId]) {
    players
        .iter_mut()
        .filter(|p| ids.contains(&p.id))
        .for_each(|p| p.is_alive = false);
}

/// State positioned at `phase` with the standard roster.
pub fn state_in(phase: Phase, humans: &[PlayerId]) -> GameState {
    let mut state = GameState::with_players(roster_with_humans(humans));
    state.phase = phase;
    state
}
