//! Runtime configuration loaded from the environment.

mod game;

pub use game::GameConfig;

pub use crate::domain::effects::Pacing;
