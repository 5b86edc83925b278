use crate::domain::roles::{Role, Team};
use crate::domain::state::Player;

/// Decide whether the game is over for this roster.
///
/// Rules, in order:
/// 1. No living werewolves: Good wins.
/// 2. Living werewolves >= living Good members: Bad wins.
/// 3. No living god role, or no living villager: Bad wins.
pub fn evaluate_winner(players: &[Player]) -> Option<Team> {
    let alive = || players.iter().filter(|p| p.is_alive);

    let wolves = alive().filter(|p| p.role == Role::Werewolf).count();
    let good = alive().filter(|p| p.team() == Team::Good).count();
    let gods = alive().filter(|p| p.role.is_god()).count();
    let villagers = alive().filter(|p| p.role == Role::Villager).count();

    if wolves == 0 {
        return Some(Team::Good);
    }
    if wolves >= good {
        return Some(Team::Bad);
    }
    if gods == 0 || villagers == 0 {
        return Some(Team::Bad);
    }
    None
}
