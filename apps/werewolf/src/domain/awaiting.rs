//! Who the machine is waiting on, per phase.

use serde::Serialize;

use crate::domain::roles::Role;
use crate::domain::state::{GameState, Phase, Player, PlayerId, WitchStep};
use crate::domain::turns::{next_computer_voter, next_human_voter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActorKind {
    Human,
    Computer,
}

impl ActorKind {
    pub fn of(player: &Player) -> Self {
        if player.is_human {
            ActorKind::Human
        } else {
            ActorKind::Computer
        }
    }
}

/// The kind of input the awaited actor owes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Task {
    AcknowledgeRole,
    Kill,
    /// Save offer; answered with `Save` or `DeclineSave`.
    Save,
    Poison,
    Check,
    AcknowledgeVision,
    Speak,
    Vote,
    Shoot,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Awaiting {
    /// Not started or finished.
    #[default]
    Idle,
    /// The engine takes the next step itself.
    Automatic,
    Actor {
        player: PlayerId,
        kind: ActorKind,
        task: Task,
    },
}

impl Awaiting {
    pub fn is_human(&self) -> bool {
        matches!(
            self,
            Awaiting::Actor {
                kind: ActorKind::Human,
                ..
            }
        )
    }
}

/// Dispatch table over (phase, actor kind).
pub fn awaiting(state: &GameState) -> Awaiting {
    match state.phase {
        Phase::Setup | Phase::GameOver => Awaiting::Idle,
        Phase::Reveal => turn_holder(state, Task::AcknowledgeRole),
        Phase::NightWerewolf => wolf_pack(state),
        Phase::NightWitch => witch(state),
        Phase::NightSeer => seer(state),
        Phase::DayAnnounce => Awaiting::Automatic,
        Phase::DayDiscuss => match state.turn.and_then(|id| state.player(id)) {
            Some(p) if p.is_alive => actor(p, Task::Speak),
            _ => Awaiting::Automatic,
        },
        Phase::DayVote => next_human_voter(state)
            .or_else(|| next_computer_voter(state))
            .and_then(|id| state.player(id))
            .map_or(Awaiting::Automatic, |p| actor(p, Task::Vote)),
        Phase::HunterAction => turn_holder(state, Task::Shoot),
    }
}

/// Representative for the wolves: the lowest-id living human wolf if any,
/// otherwise the lowest-id living computer wolf. Any living human wolf may
/// answer for a human pack.
pub fn wolf_representative(state: &GameState) -> Option<&Player> {
    let mut wolves: Vec<&Player> = state.living_wolves().collect();
    wolves.sort_by_key(|p| (!p.is_human, p.id));
    wolves.into_iter().next()
}

fn actor(player: &Player, task: Task) -> Awaiting {
    Awaiting::Actor {
        player: player.id,
        kind: ActorKind::of(player),
        task,
    }
}

fn turn_holder(state: &GameState, task: Task) -> Awaiting {
    state
        .turn
        .and_then(|id| state.player(id))
        .map_or(Awaiting::Automatic, |p| actor(p, task))
}

fn wolf_pack(state: &GameState) -> Awaiting {
    wolf_representative(state).map_or(Awaiting::Automatic, |p| actor(p, Task::Kill))
}

fn witch(state: &GameState) -> Awaiting {
    let Some(witch) = state.living_with_role(Role::Witch) else {
        return Awaiting::Automatic;
    };
    let save_offered = state.night.witch_step == WitchStep::Save
        && state.potions.save
        && state.night.wolves_target.is_some();
    if save_offered {
        actor(witch, Task::Save)
    } else if state.potions.poison {
        actor(witch, Task::Poison)
    } else {
        Awaiting::Automatic
    }
}

fn seer(state: &GameState) -> Awaiting {
    match state.living_with_role(Role::Seer) {
        Some(seer) if seer.is_human && state.night.seer_result.is_some() => {
            actor(seer, Task::AcknowledgeVision)
        }
        Some(seer) => actor(seer, Task::Check),
        None => Awaiting::Automatic,
    }
}
