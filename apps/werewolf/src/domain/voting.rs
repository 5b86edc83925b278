use std::collections::BTreeMap;

use crate::domain::state::{GameState, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// A single target holds the strictly highest count.
    Eliminated { target: PlayerId, votes: usize },
    /// Two or more targets share the highest count; nobody is eliminated.
    Tied { targets: Vec<PlayerId>, votes: usize },
    /// No ballot named anyone.
    NoVotes,
}

/// Count ballots per target. Abstentions never reach the tally.
pub fn count_votes<'a, I>(ballots: I) -> BTreeMap<PlayerId, usize>
where
    I: IntoIterator<Item = &'a PlayerId>,
{
    let mut counts = BTreeMap::new();
    for target in ballots {
        *counts.entry(*target).or_insert(0) += 1;
    }
    counts
}

/// Pick the unique maximum, or report a tie.
pub fn tally_votes(counts: &BTreeMap<PlayerId, usize>) -> VoteOutcome {
    let Some(max) = counts.values().copied().max() else {
        return VoteOutcome::NoVotes;
    };
    let leaders: Vec<PlayerId> = counts
        .iter()
        .filter(|(_, n)| **n == max)
        .map(|(id, _)| *id)
        .collect();
    match leaders.as_slice() {
        [target] => VoteOutcome::Eliminated {
            target: *target,
            votes: max,
        },
        _ => VoteOutcome::Tied {
            targets: leaders,
            votes: max,
        },
    }
}

/// Tally every human and computer ballot currently recorded in `state`.
pub fn tally_state(state: &GameState) -> VoteOutcome {
    let human = state.human_votes.values();
    let computer = state.computer_votes.values().flatten();
    tally_votes(&count_votes(human.chain(computer)))
}
