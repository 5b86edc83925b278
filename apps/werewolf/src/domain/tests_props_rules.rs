//! Property-based tests for the pure rule engines: dealing, win evaluation,
//! night resolution, turn order and vote tally.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::night::resolve_night;
use crate::domain::roles::{Role, Team, STANDARD_ROLES};
use crate::domain::setup::deal_roles;
use crate::domain::state::NightActionData;
use crate::domain::turns::next_speaker;
use crate::domain::voting::{count_votes, tally_votes, VoteOutcome};
use crate::domain::win::evaluate_winner;
use crate::domain::{test_gens, test_prelude};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: every deal holds exactly the standard nine roles and the
    /// requested number of humans in the lowest seats.
    #[test]
    fn prop_deal_has_standard_roles(seed in any::<u64>(), humans in 0u8..=9) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let players = deal_roles(humans, &mut rng).unwrap();
        let mut roles: Vec<Role> = players.iter().map(|p| p.role).collect();
        roles.sort();
        let mut expected = STANDARD_ROLES.to_vec();
        expected.sort();
        prop_assert_eq!(roles, expected);
        prop_assert_eq!(players.iter().filter(|p| p.is_human).count(), humans as usize);
        for p in &players {
            prop_assert_eq!(p.is_human, p.id <= humans);
        }
    }

    /// Property: the same seed always deals the same table.
    #[test]
    fn prop_deal_is_deterministic(seed in any::<u64>()) {
        let a = deal_roles(1, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
        let b = deal_roles(1, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Property: no living wolves means Good; otherwise Good never wins.
    #[test]
    fn prop_winner_matches_wolf_count(players in test_gens::roster_with_deaths()) {
        let wolves = players.iter().filter(|p| p.is_alive && p.role == Role::Werewolf).count();
        let winner = evaluate_winner(&players);
        if wolves == 0 {
            prop_assert_eq!(winner, Some(Team::Good));
        } else {
            prop_assert_ne!(winner, Some(Team::Good));
        }
    }

    /// Property: night deaths are exactly the unsaved wolf victim plus the poison target.
    #[test]
    fn prop_night_deaths_follow_save_and_poison(
        wolves in test_gens::maybe_target(),
        poison in test_gens::maybe_target(),
        saved in any::<bool>(),
    ) {
        let night = NightActionData {
            wolves_target: wolves,
            witch_save_used: saved,
            witch_poison_target: poison,
            ..NightActionData::default()
        };
        let dead = resolve_night(&night);
        let mut expected = std::collections::BTreeSet::new();
        if !saved {
            expected.extend(wolves);
        }
        expected.extend(poison);
        prop_assert_eq!(dead.len() <= 2, true);
        prop_assert_eq!(dead, expected);
    }

    /// Property: the next speaker is alive, strictly later, and nobody alive is skipped.
    #[test]
    fn prop_next_speaker_is_next_living_id(
        players in test_gens::roster_with_deaths(),
        current in 0u8..=9,
    ) {
        match next_speaker(&players, current) {
            Some(next) => {
                prop_assert!(next > current);
                prop_assert!(players.iter().any(|p| p.id == next && p.is_alive));
                prop_assert!(!players.iter().any(|p| p.is_alive && p.id > current && p.id < next));
            }
            None => prop_assert!(!players.iter().any(|p| p.is_alive && p.id > current)),
        }
    }

    /// Property: elimination happens only for a strict unique maximum.
    #[test]
    fn prop_tally_needs_unique_max(
        ballots in prop::collection::vec(test_gens::seat(), 0..9),
    ) {
        let counts: BTreeMap<u8, usize> = count_votes(ballots.iter());
        let max = counts.values().copied().max();
        match tally_votes(&counts) {
            VoteOutcome::Eliminated { target, votes } => {
                prop_assert_eq!(Some(votes), max);
                prop_assert_eq!(counts.values().filter(|n| **n == votes).count(), 1);
                prop_assert_eq!(counts.get(&target).copied(), Some(votes));
            }
            VoteOutcome::Tied { targets, votes } => {
                prop_assert_eq!(Some(votes), max);
                prop_assert!(targets.len() >= 2);
            }
            VoteOutcome::NoVotes => prop_assert!(ballots.is_empty()),
        }
    }
}
