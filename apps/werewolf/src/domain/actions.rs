//! The pure transition function.
//!
//! [`apply_action`] validates an action against [`awaiting`], applies it to a
//! scratch copy of the state, and commits only on success. Invalid input never
//! leaves a partial mutation behind.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::awaiting::{awaiting, ActorKind, Awaiting, Task};
use crate::domain::cascade::{enter_phase, resolve_deaths};
use crate::domain::effects::{narrate, record, system, Effect, PauseKind};
use crate::domain::night::resolve_night;
use crate::domain::roles::{Role, STANDARD_ROLES};
use crate::domain::state::{require_turn, GameState, LogKind, Phase, PlayerId, WitchStep};
use crate::domain::turns::{next_revealer, next_speaker};
use crate::domain::voting::{tally_state, VoteOutcome};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    AcknowledgeRole,
    /// Wolves pick a victim; `None` kills nobody.
    Kill { target: Option<PlayerId> },
    Save,
    DeclineSave,
    /// `None` passes on the poison tonight.
    Poison { target: Option<PlayerId> },
    Check { target: PlayerId },
    AcknowledgeVision,
    Speak { text: String },
    /// Computers may abstain with `None`; humans must name a target.
    Vote { target: Option<PlayerId> },
    /// `None` holds fire.
    Shoot { target: Option<PlayerId> },
    /// Let the engine take its own step.
    Advance,
}

impl Action {
    /// The task this action answers, `None` for `Advance`.
    pub fn task(&self) -> Option<Task> {
        match self {
            Action::AcknowledgeRole => Some(Task::AcknowledgeRole),
            Action::Kill { .. } => Some(Task::Kill),
            Action::Save | Action::DeclineSave => Some(Task::Save),
            Action::Poison { .. } => Some(Task::Poison),
            Action::Check { .. } => Some(Task::Check),
            Action::AcknowledgeVision => Some(Task::AcknowledgeVision),
            Action::Speak { .. } => Some(Task::Speak),
            Action::Vote { .. } => Some(Task::Vote),
            Action::Shoot { .. } => Some(Task::Shoot),
            Action::Advance => None,
        }
    }
}

/// Leave `Setup` with a dealt roster and enter `Reveal`.
pub fn start_game(state: &mut GameState) -> Result<Vec<Effect>, DomainError> {
    if state.phase != Phase::Setup {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("cannot start a game in {:?}", state.phase),
        ));
    }
    let mut dealt: Vec<Role> = state.players.iter().map(|p| p.role).collect();
    dealt.sort();
    let mut expected = STANDARD_ROLES.to_vec();
    expected.sort();
    if dealt != expected {
        return Err(DomainError::validation(
            ValidationKind::InvalidSetup,
            "roster must hold exactly the standard nine roles",
        ));
    }
    let mut ids: Vec<PlayerId> = state.players.iter().map(|p| p.id).collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.len() != state.players.len() {
        return Err(DomainError::validation(
            ValidationKind::InvalidSetup,
            "player ids must be unique",
        ));
    }

    let mut fx = Vec::new();
    enter_phase(state, Phase::Reveal, &mut fx);
    Ok(fx)
}

/// Apply `action` from `actor` (`None` for engine steps).
pub fn apply_action(
    state: &mut GameState,
    actor: Option<PlayerId>,
    action: Action,
) -> Result<Vec<Effect>, DomainError> {
    let expected = awaiting(state);
    let mut next = state.clone();
    let mut fx = Vec::new();

    match expected {
        Awaiting::Idle => {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("game is not running ({:?})", state.phase),
            ));
        }
        Awaiting::Automatic => {
            if action != Action::Advance {
                return Err(DomainError::validation(
                    ValidationKind::PhaseMismatch,
                    format!("{:?} expects no input", state.phase),
                ));
            }
            advance(&mut next, &mut fx)?;
        }
        Awaiting::Actor { player, kind, task } => {
            if action.task() != Some(task) {
                return Err(DomainError::validation(
                    ValidationKind::PhaseMismatch,
                    format!("{:?} expects {task:?}, got {action:?}", state.phase),
                ));
            }
            let actor = actor.ok_or_else(|| {
                DomainError::validation(ValidationKind::OutOfTurn, "action needs an actor")
            })?;
            check_actor(state, player, kind, task, actor)?;
            perform(&mut next, actor, kind, action, &mut fx)?;
        }
    }

    *state = next;
    Ok(fx)
}

fn check_actor(
    state: &GameState,
    awaited: PlayerId,
    kind: ActorKind,
    task: Task,
    actor: PlayerId,
) -> Result<(), DomainError> {
    let allowed = match (task, kind) {
        // Any living human wolf answers for a human pack.
        (Task::Kill, ActorKind::Human) => state
            .player(actor)
            .is_some_and(|p| p.is_alive && p.is_human && p.role == Role::Werewolf),
        _ => actor == awaited,
    };
    if allowed {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("player {actor} cannot act now; waiting on player {awaited}"),
        ))
    }
}

fn perform(
    state: &mut GameState,
    actor: PlayerId,
    kind: ActorKind,
    action: Action,
    fx: &mut Vec<Effect>,
) -> Result<(), DomainError> {
    match action {
        Action::AcknowledgeRole => acknowledge_role(state, actor, fx),
        Action::Kill { target } => wolves_kill(state, target, fx),
        Action::Save => witch_save(state, fx),
        Action::DeclineSave => {
            state.night.witch_step = WitchStep::Poison;
            Ok(())
        }
        Action::Poison { target } => witch_poison(state, target, fx),
        Action::Check { target } => seer_check(state, actor, kind, target, fx),
        Action::AcknowledgeVision => {
            state.night.seer_result = None;
            finish_seer(state, fx);
            Ok(())
        }
        Action::Speak { text } => speak(state, actor, &text, fx),
        Action::Vote { target } => vote(state, actor, kind, target, fx),
        Action::Shoot { target } => hunter_shoot(state, actor, target, fx),
        Action::Advance => Err(DomainError::invariant("advance routed as actor input")),
    }
}

fn advance(state: &mut GameState, fx: &mut Vec<Effect>) -> Result<(), DomainError> {
    match state.phase {
        Phase::Reveal => {
            everyone_has_seen(state, fx);
            Ok(())
        }
        Phase::NightWerewolf => wolves_kill(state, None, fx),
        Phase::NightWitch => {
            finish_witch(state, fx);
            Ok(())
        }
        Phase::NightSeer => {
            finish_seer(state, fx);
            Ok(())
        }
        Phase::DayAnnounce => {
            let dead = resolve_night(&state.night);
            resolve_deaths(state, &dead, Phase::DayDiscuss, fx);
            Ok(())
        }
        Phase::DayDiscuss => {
            match state.turn.and_then(|t| next_speaker(&state.players, t)) {
                Some(next) => state.turn = Some(next),
                None => enter_phase(state, Phase::DayVote, fx),
            }
            Ok(())
        }
        Phase::DayVote => {
            close_vote(state, fx);
            Ok(())
        }
        Phase::HunterAction => {
            let resume = state.resume_phase.take().unwrap_or(Phase::NightWerewolf);
            state.turn = None;
            resolve_deaths(state, &BTreeSet::new(), resume, fx);
            Ok(())
        }
        Phase::Setup | Phase::GameOver => Err(DomainError::invariant(format!(
            "advance called in {:?}",
            state.phase
        ))),
    }
}

fn acknowledge_role(
    state: &mut GameState,
    actor: PlayerId,
    fx: &mut Vec<Effect>,
) -> Result<(), DomainError> {
    match next_revealer(&state.players, actor) {
        Some(next) => {
            state.turn = Some(next);
            system(state, fx, format!("Pass the device to Player {next}."));
            let role = state
                .player(next)
                .map(|p| p.role)
                .ok_or_else(|| DomainError::invariant("revealer vanished from roster"))?;
            fx.push(Effect::RevealRole { player: next, role });
        }
        None => everyone_has_seen(state, fx),
    }
    Ok(())
}

fn everyone_has_seen(state: &mut GameState, fx: &mut Vec<Effect>) {
    state.turn = None;
    system(state, fx, "Everyone has seen their role. Night falls...");
    narrate(fx, "Everyone has seen their role. Night falls. Everyone, close your eyes.");
    fx.push(Effect::Pause(PauseKind::NightStep));
    enter_phase(state, Phase::NightWerewolf, fx);
}

fn wolves_kill(
    state: &mut GameState,
    target: Option<PlayerId>,
    fx: &mut Vec<Effect>,
) -> Result<(), DomainError> {
    if let Some(t) = target {
        state.require_living(t)?;
    }
    state.night.wolves_target = target;
    narrate(fx, "Werewolves, close your eyes.");
    fx.push(Effect::Pause(PauseKind::NightStep));
    enter_phase(state, Phase::NightWitch, fx);
    Ok(())
}

fn witch_save(state: &mut GameState, fx: &mut Vec<Effect>) -> Result<(), DomainError> {
    if state.night.wolves_target.is_none() {
        return Err(DomainError::validation(
            ValidationKind::InvalidTarget,
            "nobody to save tonight",
        ));
    }
    state.potions.consume_save()?;
    state.night.witch_save_used = true;
    finish_witch(state, fx);
    Ok(())
}

fn witch_poison(
    state: &mut GameState,
    target: Option<PlayerId>,
    fx: &mut Vec<Effect>,
) -> Result<(), DomainError> {
    if let Some(t) = target {
        state.require_living(t)?;
        state.potions.consume_poison()?;
        state.night.witch_poison_target = Some(t);
    }
    finish_witch(state, fx);
    Ok(())
}

fn finish_witch(state: &mut GameState, fx: &mut Vec<Effect>) {
    narrate(fx, "Witch, close your eyes.");
    fx.push(Effect::Pause(PauseKind::NightStep));
    enter_phase(state, Phase::NightSeer, fx);
}

fn seer_check(
    state: &mut GameState,
    seer: PlayerId,
    kind: ActorKind,
    target: PlayerId,
    fx: &mut Vec<Effect>,
) -> Result<(), DomainError> {
    if target == seer {
        return Err(DomainError::validation(
            ValidationKind::InvalidTarget,
            "the seer cannot inspect themselves",
        ));
    }
    let team = state.require_living(target)?.team();
    state.night.seer_check = Some(target);
    state.seer_findings.insert(target, team);
    match kind {
        // Only a human Seer gets an on-screen vision.
        ActorKind::Human => {
            state.night.seer_result = Some(team);
            fx.push(Effect::SeerVision { seer, target, team });
        }
        ActorKind::Computer => finish_seer(state, fx),
    }
    Ok(())
}

fn finish_seer(state: &mut GameState, fx: &mut Vec<Effect>) {
    narrate(fx, "Seer, close your eyes.");
    fx.push(Effect::Pause(PauseKind::NightStep));
    enter_phase(state, Phase::DayAnnounce, fx);
}

fn speak(
    state: &mut GameState,
    speaker: PlayerId,
    text: &str,
    fx: &mut Vec<Effect>,
) -> Result<(), DomainError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::EmptyMessage,
            "speech must not be empty",
        ));
    }
    record(
        state,
        fx,
        LogKind::Chat,
        Some(format!("Player {speaker}")),
        text,
    );
    fx.push(Effect::Pause(PauseKind::Speech {
        chars: text.chars().count(),
    }));
    let current = require_turn(state, "speak")?;
    match next_speaker(&state.players, current) {
        Some(next) => state.turn = Some(next),
        None => enter_phase(state, Phase::DayVote, fx),
    }
    Ok(())
}

fn vote(
    state: &mut GameState,
    voter: PlayerId,
    kind: ActorKind,
    target: Option<PlayerId>,
    fx: &mut Vec<Effect>,
) -> Result<(), DomainError> {
    if let Some(t) = target {
        state.require_living(t)?;
    }
    match (kind, target) {
        (ActorKind::Human, None) => {
            return Err(DomainError::validation(
                ValidationKind::InvalidTarget,
                "a vote must name a living player",
            ));
        }
        (ActorKind::Human, Some(t)) => {
            state.human_votes.insert(voter, t);
        }
        (ActorKind::Computer, _) => {
            state.computer_votes.insert(voter, target);
        }
    }
    let line = match target {
        Some(t) => format!("Player {voter} voted for Player {t}"),
        None => format!("Player {voter} abstained"),
    };
    record(state, fx, LogKind::Action, None, line);
    Ok(())
}

fn close_vote(state: &mut GameState, fx: &mut Vec<Effect>) {
    let outcome = tally_state(state);
    state.human_votes.clear();
    state.computer_votes.clear();
    match outcome {
        VoteOutcome::Eliminated { target, .. } => {
            let msg = format!("Player {target} was voted out!");
            system(state, fx, msg.clone());
            narrate(fx, msg);
            fx.push(Effect::Pause(PauseKind::Verdict));
            resolve_deaths(state, &BTreeSet::from([target]), Phase::NightWerewolf, fx);
        }
        VoteOutcome::Tied { .. } | VoteOutcome::NoVotes => {
            system(state, fx, "Vote tied. No one executed.");
            narrate(fx, "Vote tied. No one executed. Night falls.");
            fx.push(Effect::Pause(PauseKind::Verdict));
            enter_phase(state, Phase::NightWerewolf, fx);
        }
    }
}

fn hunter_shoot(
    state: &mut GameState,
    hunter: PlayerId,
    target: Option<PlayerId>,
    fx: &mut Vec<Effect>,
) -> Result<(), DomainError> {
    if let Some(t) = target {
        state.require_living(t)?;
    }
    let msg = match target {
        Some(t) => format!("Player {hunter} shoots Player {t}!"),
        None => format!("Player {hunter} shoots nobody."),
    };
    system(state, fx, msg.clone());
    narrate(fx, msg);
    fx.push(Effect::Pause(PauseKind::Revenge));

    let resume = state.resume_phase.take().unwrap_or(Phase::NightWerewolf);
    state.turn = None;
    let dead: BTreeSet<PlayerId> = target.into_iter().collect();
    resolve_deaths(state, &dead, resume, fx);
    Ok(())
}
