//! Turn order helpers. Ids are the sort key; nothing wraps around.

use crate::domain::state::{GameState, Player, PlayerId};

/// Next living player with an id strictly greater than `current`.
///
/// `current == 0` means "before anyone". Returns `None` past the last living
/// player, which ends the discussion.
pub fn next_speaker(players: &[Player], current: PlayerId) -> Option<PlayerId> {
    players
        .iter()
        .filter(|p| p.is_alive && p.id > current)
        .map(|p| p.id)
        .min()
}

pub fn first_speaker(players: &[Player]) -> Option<PlayerId> {
    next_speaker(players, 0)
}

/// Next human (living or not) after `current`, for the reveal loop.
pub fn next_revealer(players: &[Player], current: PlayerId) -> Option<PlayerId> {
    players
        .iter()
        .filter(|p| p.is_human && p.id > current)
        .map(|p| p.id)
        .min()
}

/// Lowest-id living human who has not voted yet.
pub fn next_human_voter(state: &GameState) -> Option<PlayerId> {
    state
        .living_humans()
        .filter(|p| !state.human_votes.contains_key(&p.id))
        .map(|p| p.id)
        .min()
}

/// Lowest-id living computer player without a ballot. Only meaningful once
/// every living human has voted.
pub fn next_computer_voter(state: &GameState) -> Option<PlayerId> {
    state
        .alive()
        .filter(|p| !p.is_human && !state.computer_votes.contains_key(&p.id))
        .map(|p| p.id)
        .min()
}
