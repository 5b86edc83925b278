// Transition-function tests: one phase at a time, through apply_action only.

use crate::domain::actions::{apply_action, start_game, Action};
use crate::domain::awaiting::{awaiting, ActorKind, Awaiting, Task};
use crate::domain::cascade::enter_phase;
use crate::domain::effects::Effect;
use crate::domain::fixtures::{kill, state_in};
use crate::domain::roles::Team;
use crate::domain::state::{GameState, LogKind, NightActionData, Phase, WitchPotions};
use crate::errors::domain::ValidationKind;

fn act(state: &mut GameState, actor: u8, action: Action) -> Vec<Effect> {
    apply_action(state, Some(actor), action).expect("action should be accepted")
}

fn advance(state: &mut GameState) -> Vec<Effect> {
    apply_action(state, None, Action::Advance).expect("advance should be accepted")
}

fn last_log(state: &GameState) -> String {
    state.log.entries().last().map(|e| e.content.clone()).unwrap_or_default()
}

#[test]
fn start_with_no_humans_skips_reveal() {
    let mut state = state_in(Phase::Setup, &[]);
    start_game(&mut state).unwrap();
    assert_eq!(state.phase, Phase::Reveal);
    assert_eq!(awaiting(&state), Awaiting::Automatic);

    advance(&mut state);
    assert_eq!(state.phase, Phase::NightWerewolf);
    assert_eq!(
        awaiting(&state),
        Awaiting::Actor {
            player: 1,
            kind: ActorKind::Computer,
            task: Task::Kill
        }
    );
}

#[test]
fn reveal_walks_humans_in_id_order() {
    let mut state = state_in(Phase::Setup, &[2, 5]);
    let fx = start_game(&mut state).unwrap();
    assert!(fx.contains(&Effect::RevealRole {
        player: 2,
        role: crate::domain::roles::Role::Werewolf
    }));
    assert_eq!(state.turn, Some(2));

    let fx = act(&mut state, 2, Action::AcknowledgeRole);
    assert_eq!(state.turn, Some(5));
    assert!(fx.iter().any(|e| matches!(e, Effect::RevealRole { player: 5, .. })));

    act(&mut state, 5, Action::AcknowledgeRole);
    assert_eq!(state.phase, Phase::NightWerewolf);
    assert!(state
        .log
        .entries()
        .iter()
        .any(|e| e.content == "Everyone has seen their role. Night falls..."));
}

#[test]
fn start_rejects_bad_roster() {
    let mut state = state_in(Phase::Setup, &[]);
    state.players.pop();
    let err = start_game(&mut state).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::InvalidSetup));
    assert_eq!(state.phase, Phase::Setup);
}

#[test]
fn wrong_phase_input_changes_nothing() {
    let mut state = state_in(Phase::NightWerewolf, &[4]);
    let before_log = state.log.len();
    let err = apply_action(&mut state, Some(4), Action::Vote { target: Some(1) }).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::PhaseMismatch));
    assert_eq!(state.phase, Phase::NightWerewolf);
    assert_eq!(state.log.len(), before_log);
    assert!(state.human_votes.is_empty());
}

#[test]
fn out_of_turn_voter_is_rejected() {
    let mut state = state_in(Phase::DayVote, &[2, 6]);
    let err = apply_action(&mut state, Some(6), Action::Vote { target: Some(1) }).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::OutOfTurn));
    assert!(state.human_votes.is_empty());
}

#[test]
fn human_vote_must_name_a_living_target() {
    let mut state = state_in(Phase::DayVote, &[4]);
    kill(&mut state.players, &[1]);

    let err = apply_action(&mut state, Some(4), Action::Vote { target: None }).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::InvalidTarget));

    let err = apply_action(&mut state, Some(4), Action::Vote { target: Some(1) }).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::DeadPlayer));

    let err = apply_action(&mut state, Some(4), Action::Vote { target: Some(12) }).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::UnknownPlayer));

    act(&mut state, 4, Action::Vote { target: Some(2) });
    assert_eq!(state.human_votes.get(&4), Some(&2));
    assert_eq!(last_log(&state), "Player 4 voted for Player 2");
}

#[test]
fn any_living_human_wolf_answers_for_the_pack() {
    let mut state = state_in(Phase::NightWerewolf, &[2, 3, 4]);
    let err = apply_action(&mut state, Some(4), Action::Kill { target: Some(5) }).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::OutOfTurn));

    act(&mut state, 3, Action::Kill { target: Some(5) });
    assert_eq!(state.night.wolves_target, Some(5));
    assert_eq!(state.phase, Phase::NightWitch);
}

#[test]
fn saved_victim_survives_the_night() {
    let mut state = state_in(Phase::NightWerewolf, &[]);
    act(&mut state, 1, Action::Kill { target: Some(7) });
    act(&mut state, 8, Action::Save);
    assert!(!state.potions.save);
    assert_eq!(state.phase, Phase::NightSeer);

    act(&mut state, 7, Action::Check { target: 1 });
    assert_eq!(state.phase, Phase::DayAnnounce);
    assert_eq!(state.night.seer_result, None);
    assert_eq!(state.seer_findings.get(&1), Some(&Team::Bad));
    assert_eq!(last_log(&state), "The sun rises. Everyone survived the night!");

    advance(&mut state);
    assert!(state.is_alive(7));
    assert_eq!(state.phase, Phase::DayDiscuss);
    assert_eq!(state.day, 2);
    assert_eq!(state.turn, Some(1));
}

#[test]
fn declined_save_then_poison_kills_two_and_silences_hunter() {
    let mut state = state_in(Phase::NightWerewolf, &[]);
    act(&mut state, 1, Action::Kill { target: Some(5) });
    act(&mut state, 8, Action::DeclineSave);
    assert_eq!(state.phase, Phase::NightWitch);
    act(&mut state, 8, Action::Poison { target: Some(9) });
    assert!(!state.potions.poison);
    assert!(state.potions.save);
    act(&mut state, 7, Action::Check { target: 2 });
    assert_eq!(last_log(&state), "The sun rises. Player 5, 9 died last night.");

    advance(&mut state);
    assert!(!state.is_alive(5));
    assert!(!state.is_alive(9));
    assert_eq!(state.phase, Phase::DayDiscuss);
}

#[test]
fn spent_save_is_never_offered_again() {
    let mut state = state_in(Phase::NightWitch, &[]);
    state.night.wolves_target = Some(4);
    state.potions = WitchPotions {
        save: false,
        poison: true,
    };
    let err = apply_action(&mut state, Some(8), Action::Save).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::PhaseMismatch));
    assert!(matches!(
        awaiting(&state),
        Awaiting::Actor {
            task: Task::Poison,
            ..
        }
    ));
}

#[test]
fn computer_seer_finding_is_private_and_outlives_the_night() {
    let mut state = state_in(Phase::NightSeer, &[]);
    let fx = act(&mut state, 7, Action::Check { target: 2 });
    assert!(!fx.iter().any(|e| matches!(e, Effect::SeerVision { .. })));
    assert!(state.log.entries().iter().all(|e| !e.content.contains("team")));

    enter_phase(&mut state, Phase::NightWerewolf, &mut Vec::new());
    assert_eq!(state.night, NightActionData::default());
    assert_eq!(state.seer_findings.get(&2), Some(&Team::Bad));
}

#[test]
fn human_seer_must_acknowledge_vision() {
    let mut state = state_in(Phase::NightSeer, &[7]);
    let err = apply_action(&mut state, Some(7), Action::Check { target: 7 }).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::InvalidTarget));

    let fx = act(&mut state, 7, Action::Check { target: 1 });
    assert!(fx.contains(&Effect::SeerVision {
        seer: 7,
        target: 1,
        team: Team::Bad
    }));
    assert_eq!(state.phase, Phase::NightSeer);
    assert_eq!(state.night.seer_result, Some(Team::Bad));

    act(&mut state, 7, Action::AcknowledgeVision);
    assert_eq!(state.night.seer_result, None);
    assert_eq!(state.seer_findings.get(&1), Some(&Team::Bad));
    assert_eq!(state.phase, Phase::DayAnnounce);
}

#[test]
fn speeches_rotate_then_voting_opens() {
    let mut state = state_in(Phase::DayDiscuss, &[]);
    state.turn = Some(8);

    let err = apply_action(&mut state, Some(8), Action::Speak { text: "   ".into() }).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::EmptyMessage));

    act(&mut state, 8, Action::Speak { text: "I trust Player 4.".into() });
    assert_eq!(state.turn, Some(9));
    let entry = state.log.entries().last().unwrap();
    assert_eq!(entry.kind, LogKind::Chat);
    assert_eq!(entry.author.as_deref(), Some("Player 8"));

    act(&mut state, 9, Action::Speak { text: "Player 1 is suspicious.".into() });
    assert_eq!(state.phase, Phase::DayVote);
    assert_eq!(state.turn, None);
}

#[test]
fn hunter_voted_out_takes_revenge_then_night_resumes() {
    let mut state = state_in(Phase::DayVote, &[]);
    for voter in 1..=8 {
        act(&mut state, voter, Action::Vote { target: Some(9) });
    }
    act(&mut state, 9, Action::Vote { target: Some(1) });
    assert_eq!(awaiting(&state), Awaiting::Automatic);

    advance(&mut state);
    assert_eq!(state.phase, Phase::HunterAction);
    assert_eq!(state.turn, Some(9));
    assert!(state.human_votes.is_empty() && state.computer_votes.is_empty());

    act(&mut state, 9, Action::Shoot { target: Some(1) });
    assert!(!state.is_alive(1));
    assert_eq!(state.phase, Phase::NightWerewolf);
    assert_eq!(state.resume_phase, None);
}

#[test]
fn tied_vote_eliminates_nobody() {
    let mut state = state_in(Phase::DayVote, &[]);
    state.potions.poison = false;
    state.night.seer_check = Some(3);
    for voter in 1..=4 {
        act(&mut state, voter, Action::Vote { target: Some(5) });
    }
    for voter in 5..=8 {
        act(&mut state, voter, Action::Vote { target: Some(6) });
    }
    act(&mut state, 9, Action::Vote { target: None });
    assert_eq!(last_log(&state), "Player 9 abstained");

    advance(&mut state);
    assert!(state.alive().count() == 9);
    assert_eq!(state.phase, Phase::NightWerewolf);
    assert_eq!(state.night, NightActionData::default());
    assert!(!state.potions.poison, "potions are untouched by a new night");
}

#[test]
fn hunter_may_hold_fire() {
    let mut state = state_in(Phase::HunterAction, &[]);
    kill(&mut state.players, &[9]);
    state.turn = Some(9);
    state.resume_phase = Some(Phase::DayDiscuss);

    act(&mut state, 9, Action::Shoot { target: None });
    assert_eq!(state.alive().count(), 8);
    assert_eq!(state.phase, Phase::DayDiscuss);
}

#[test]
fn dawn_kill_can_end_the_game() {
    let mut state = state_in(Phase::NightWerewolf, &[]);
    kill(&mut state.players, &[4, 5]);
    state.potions.save = false;
    state.potions.poison = false;

    act(&mut state, 1, Action::Kill { target: Some(6) });
    advance(&mut state); // witch has nothing left
    act(&mut state, 7, Action::Check { target: 2 });
    let fx = advance(&mut state);

    assert_eq!(state.phase, Phase::GameOver);
    assert_eq!(state.winner, Some(Team::Bad));
    assert!(fx.contains(&Effect::GameOver { winner: Team::Bad }));
    assert_eq!(awaiting(&state), Awaiting::Idle);
    assert!(apply_action(&mut state, None, Action::Advance).is_err());
}
