use std::collections::BTreeSet;

use crate::domain::state::{NightActionData, PlayerId};

/// Combine the night's actions into the dawn death list.
///
/// The wolves' victim dies unless the save potion was used this cycle; the
/// poison victim dies regardless. Both flags apply to the same dusk snapshot,
/// so the same id can appear only once. The seer's check never kills.
pub fn resolve_night(night: &NightActionData) -> BTreeSet<PlayerId> {
    let mut dead = BTreeSet::new();
    if let Some(victim) = night.wolves_target {
        if !night.witch_save_used {
            dead.insert(victim);
        }
    }
    if let Some(poisoned) = night.witch_poison_target {
        dead.insert(poisoned);
    }
    dead
}
