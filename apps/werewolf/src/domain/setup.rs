//! Role dealing for a new game.

use rand::prelude::*;

use crate::domain::roles::{Personality, PLAYERS, STANDARD_ROLES};
use crate::domain::state::{Player, PlayerId};
use crate::errors::domain::{DomainError, ValidationKind};

/// Shuffle the standard roles and seat them as players `1..=9`.
///
/// The first `human_count` seats are human; personalities are drawn
/// uniformly from the fixed label set.
pub fn deal_roles<R: Rng + ?Sized>(
    human_count: u8,
    rng: &mut R,
) -> Result<Vec<Player>, DomainError> {
    if human_count as usize > PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::InvalidSetup,
            format!("human_count must be at most {PLAYERS}, got {human_count}"),
        ));
    }

    let mut roles = STANDARD_ROLES;
    roles.shuffle(rng);

    let players = roles
        .iter()
        .enumerate()
        .map(|(index, &role)| {
            let personality = *Personality::ALL
                .choose(rng)
                .unwrap_or(&Personality::Logical);
            Player {
                id: (index + 1) as PlayerId,
                role,
                personality,
                is_human: index < human_count as usize,
                is_alive: true,
            }
        })
        .collect();

    Ok(players)
}
