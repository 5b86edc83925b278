//! RNG seed derivation utilities for deterministic game behavior.
//!
//! Provides functions to derive unique-but-deterministic seeds for different
//! game contexts (role dealing, fallback decisions) from a base game seed.

/// Derive a seed for dealing roles at setup.
pub fn derive_setup_seed(game_seed: u64) -> u64 {
    game_seed.wrapping_add(1) // Offset to distinguish from fallback seed
}

/// Derive a seed for the fallback target picker.
///
/// Kept separate from the setup seed so the same game seed replays the same
/// deal regardless of how many collaborator failures occur.
pub fn derive_fallback_seed(game_seed: u64) -> u64 {
    game_seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add(2) // Offset to distinguish from setup seed
}
