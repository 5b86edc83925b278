//! Death cascade and phase entry.
//!
//! Every change to who is alive goes through [`resolve_deaths`], which is also
//! the only path into `GameOver`.

use std::collections::BTreeSet;

use crate::domain::effects::{narrate, record, system, Effect, PauseKind};
use crate::domain::night::resolve_night;
use crate::domain::roles::{Role, Team};
use crate::domain::state::{GameState, LogKind, NightActionData, Phase, PlayerId};
use crate::domain::turns::{first_speaker, next_revealer};
use crate::domain::win::evaluate_winner;

/// What a cascade did, for callers that want more than the effect list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeReport {
    /// Ids that flipped from alive to dead, ascending.
    pub newly_dead: Vec<PlayerId>,
    /// Hunter now holding a revenge shot.
    pub hunter: Option<PlayerId>,
    pub winner: Option<Team>,
}

/// Apply `dead` to the roster and move the machine on.
///
/// 1. Mark living ids dead; unknown or already-dead ids are ignored.
/// 2. A newly dead Hunter gets a revenge shot unless this cycle's poison killed him.
/// 3. A winner ends the game immediately, discarding any revenge shot.
/// 4. A revenge shot detours through `HunterAction`, resuming at `next`.
/// 5. Otherwise enter `next`.
pub fn resolve_deaths(
    state: &mut GameState,
    dead: &BTreeSet<PlayerId>,
    next: Phase,
    fx: &mut Vec<Effect>,
) -> CascadeReport {
    let mut report = CascadeReport::default();

    for player in state.players.iter_mut() {
        if player.is_alive && dead.contains(&player.id) {
            player.is_alive = false;
            report.newly_dead.push(player.id);
        }
    }

    let poisoned = state.night.witch_poison_target;
    let hunters: Vec<PlayerId> = state
        .players
        .iter()
        .filter(|p| report.newly_dead.contains(&p.id))
        .filter(|p| p.role == Role::Hunter && poisoned != Some(p.id))
        .map(|p| p.id)
        .collect();
    debug_assert!(hunters.len() <= 1, "more than one hunter pending: {hunters:?}");
    report.hunter = hunters.first().copied();

    if let Some(winner) = evaluate_winner(&state.players) {
        finish_game(state, winner, fx);
        report.winner = Some(winner);
        report.hunter = None;
        return report;
    }

    if let Some(hunter) = report.hunter {
        state.phase = Phase::HunterAction;
        state.turn = Some(hunter);
        state.resume_phase = Some(next);
        let msg = format!("Player {hunter} (Hunter) died! They can take someone with them.");
        system(state, fx, msg.clone());
        narrate(fx, msg);
        return report;
    }

    enter_phase(state, next, fx);
    report
}

/// Move to `phase`, running its entry work and narration.
///
/// Entering `NightWerewolf` starts a new cycle: night scratch and ballots are
/// cleared, potions are kept. Entering `DayDiscuss` bumps the day counter and
/// seats the first speaker, or falls through to `DayVote` when nobody can speak.
pub fn enter_phase(state: &mut GameState, phase: Phase, fx: &mut Vec<Effect>) {
    match phase {
        Phase::Reveal => {
            state.phase = Phase::Reveal;
            state.turn = next_revealer(&state.players, 0);
            if let Some(first) = state.turn {
                system(
                    state,
                    fx,
                    format!("Game Started! Pass the device to Player {first}."),
                );
                if let Some(role) = state.player(first).map(|p| p.role) {
                    fx.push(Effect::RevealRole {
                        player: first,
                        role,
                    });
                }
            } else {
                system(state, fx, "Game Started!");
            }
        }
        Phase::NightWerewolf => {
            state.phase = Phase::NightWerewolf;
            state.turn = None;
            state.night = NightActionData::default();
            state.human_votes.clear();
            state.computer_votes.clear();
            system(state, fx, "Werewolves, wake up...");
            narrate(fx, "Werewolves, wake up. Choose your target.");
        }
        Phase::NightWitch => {
            state.phase = Phase::NightWitch;
            system(state, fx, "Witch, wake up...");
            narrate(
                fx,
                "Witch, wake up. I will show you who died. You may use your potions.",
            );
        }
        Phase::NightSeer => {
            state.phase = Phase::NightSeer;
            system(state, fx, "Seer, wake up...");
            narrate(fx, "Seer, wake up. Choose a player to inspect.");
        }
        Phase::DayAnnounce => {
            state.phase = Phase::DayAnnounce;
            let dead = resolve_night(&state.night);
            let msg = if dead.is_empty() {
                "The sun rises. Everyone survived the night!".to_string()
            } else {
                let ids: Vec<String> = dead.iter().map(|id| id.to_string()).collect();
                format!("The sun rises. Player {} died last night.", ids.join(", "))
            };
            system(state, fx, msg.clone());
            narrate(fx, msg);
            fx.push(Effect::Pause(PauseKind::Dawn));
        }
        Phase::DayDiscuss => match first_speaker(&state.players) {
            Some(speaker) => {
                state.phase = Phase::DayDiscuss;
                state.day += 1;
                state.turn = Some(speaker);
                let day = state.day;
                system(state, fx, format!("Day {day}. Discussion begins."));
            }
            None => enter_phase(state, Phase::DayVote, fx),
        },
        Phase::DayVote => {
            state.phase = Phase::DayVote;
            state.turn = None;
            state.human_votes.clear();
            state.computer_votes.clear();
            system(state, fx, "Discussion ended. Time to vote!");
            narrate(fx, "Discussion ended. Time to vote.");
        }
        Phase::Setup | Phase::HunterAction | Phase::GameOver => {
            state.phase = phase;
        }
    }
}

fn finish_game(state: &mut GameState, winner: Team, fx: &mut Vec<Effect>) {
    state.phase = Phase::GameOver;
    state.winner = Some(winner);
    state.turn = None;
    state.resume_phase = None;
    let msg = format!("Game over! The {winner} team wins.");
    record(state, fx, LogKind::System, None, msg.clone());
    narrate(fx, msg);
    fx.push(Effect::GameOver { winner });
}
