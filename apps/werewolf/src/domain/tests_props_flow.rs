//! Property-based tests over whole games driven through apply_action.
//! Each case deals a table, then plays random legal moves to the end,
//! checking the cross-step invariants after every transition.

use proptest::prelude::*;
use rand::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::domain::actions::{apply_action, start_game, Action};
use crate::domain::awaiting::{awaiting, Awaiting, Task};
use crate::domain::setup::deal_roles;
use crate::domain::state::{GameState, Phase, PlayerId};
use crate::domain::test_prelude;

const STEP_LIMIT: usize = 2_000;

fn random_living(state: &GameState, rng: &mut ChaCha8Rng, exclude: PlayerId) -> Option<PlayerId> {
    let ids: Vec<PlayerId> = state
        .alive()
        .map(|p| p.id)
        .filter(|id| *id != exclude)
        .collect();
    ids.choose(rng).copied()
}

fn legal_move(state: &GameState, rng: &mut ChaCha8Rng) -> (Option<PlayerId>, Action) {
    match awaiting(state) {
        Awaiting::Idle | Awaiting::Automatic => (None, Action::Advance),
        Awaiting::Actor { player, task, .. } => {
            let target = random_living(state, rng, player);
            let action = match task {
                Task::AcknowledgeRole => Action::AcknowledgeRole,
                Task::Kill => Action::Kill { target },
                Task::Save if rng.random_bool(0.5) => Action::Save,
                Task::Save => Action::DeclineSave,
                Task::Poison if rng.random_bool(0.3) => Action::Poison { target },
                Task::Poison => Action::Poison { target: None },
                Task::Check => match target {
                    Some(target) => Action::Check { target },
                    None => Action::AcknowledgeVision,
                },
                Task::AcknowledgeVision => Action::AcknowledgeVision,
                Task::Speak => Action::Speak {
                    text: format!("Player {player} has thoughts."),
                },
                Task::Vote => Action::Vote { target },
                Task::Shoot => Action::Shoot { target },
            };
            (Some(player), action)
        }
    }
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: random legal play always terminates with a winner, and
    /// alive flags, potions and log ids only ever move forward.
    #[test]
    fn prop_random_games_keep_invariants(seed in any::<u64>(), humans in 0u8..=9) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = GameState::with_players(deal_roles(humans, &mut rng).unwrap());
        start_game(&mut state).unwrap();

        let mut steps = 0;
        while state.phase != Phase::GameOver {
            prop_assert!(steps < STEP_LIMIT, "game did not finish");
            steps += 1;

            let before = state.clone();
            let (actor, action) = legal_move(&state, &mut rng);
            apply_action(&mut state, actor, action.clone())
                .map_err(|e| TestCaseError::fail(format!("{action:?} rejected: {e}")))?;

            for (old, new) in before.players.iter().zip(&state.players) {
                prop_assert!(old.is_alive || !new.is_alive, "player {} revived", old.id);
            }
            prop_assert!(before.potions.save || !state.potions.save);
            prop_assert!(before.potions.poison || !state.potions.poison);
            prop_assert!(state.day >= before.day);

            let ids: Vec<u64> = state.log.entries().iter().map(|e| e.id).collect();
            prop_assert!(ids.iter().enumerate().all(|(i, id)| *id == i as u64 + 1));
        }

        prop_assert!(state.winner.is_some());
        prop_assert_eq!(state.turn, None);
    }
}
