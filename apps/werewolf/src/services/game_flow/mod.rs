//! Game flow orchestration service - drives the pure domain transitions.
//!
//! The service owns the single authoritative [`GameState`]. Human input comes
//! in through the entry points in `player_actions`; everything else (engine
//! steps and computer turns) is run by the processing loop until the game
//! needs a human or is over.

mod ai_coordinator;
mod decision_gate;
mod orchestration;
mod player_actions;

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::sync::mpsc::UnboundedSender;

pub use decision_gate::{DecisionGate, DecisionTicket};

use crate::ai::{create_decider, DecisionMaker};
use crate::config::GameConfig;
use crate::domain::awaiting::{awaiting, Awaiting};
use crate::domain::effects::Effect;
use crate::domain::game_transition::GameTransition;
use crate::domain::roles::Team;
use crate::domain::seed_derivation::derive_fallback_seed;
use crate::domain::state::GameState;
use crate::error::AppError;
use crate::errors::domain::DomainError;

/// What one call into the service did.
#[derive(Debug, Default)]
pub struct FlowReport {
    /// Effects in the order they were produced.
    pub effects: Vec<Effect>,
    pub transitions: Vec<GameTransition>,
    /// Set when the submitted human event was refused; nothing changed.
    pub ignored: Option<DomainError>,
    /// Computer decisions replaced by the fallback.
    pub fallbacks: usize,
    /// Who the game waits on now.
    pub awaiting: Awaiting,
}

impl FlowReport {
    pub fn was_ignored(&self) -> bool {
        self.ignored.is_some()
    }
}

/// Game flow service - one instance per running game.
pub struct GameFlowService {
    state: GameState,
    config: GameConfig,
    decider: Arc<dyn DecisionMaker>,
    gate: Arc<DecisionGate>,
    seed: u64,
    fallback_rng: ChaCha8Rng,
    effect_tx: Option<UnboundedSender<Effect>>,
}

impl GameFlowService {
    pub fn new(config: GameConfig, decider: Arc<dyn DecisionMaker>) -> Self {
        let seed = config.seed.unwrap_or(0);
        Self {
            state: GameState::new(),
            config,
            decider,
            gate: DecisionGate::new(),
            seed,
            fallback_rng: ChaCha8Rng::seed_from_u64(derive_fallback_seed(seed)),
            effect_tx: None,
        }
    }

    /// Build with the decision maker named in `config.ai`.
    pub fn from_config(config: GameConfig) -> Result<Self, AppError> {
        let decider = create_decider(&config.ai, &config.ai_config).ok_or_else(|| {
            AppError::config(format!("unknown decision maker '{}'", config.ai))
        })?;
        Ok(Self::new(config, decider))
    }

    /// Continue from an existing state instead of dealing a new game.
    pub fn resume(
        config: GameConfig,
        decider: Arc<dyn DecisionMaker>,
        state: GameState,
    ) -> Self {
        Self {
            state,
            ..Self::new(config, decider)
        }
    }

    /// Share a decision gate with other services.
    pub fn with_gate(mut self, gate: Arc<DecisionGate>) -> Self {
        self.gate = gate;
        self
    }

    /// Stream effects as they are played, in addition to the reports.
    pub fn with_effect_sink(mut self, tx: UnboundedSender<Effect>) -> Self {
        self.effect_tx = Some(tx);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seed of the current game (dealt or configured).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn awaiting(&self) -> Awaiting {
        awaiting(&self.state)
    }

    pub fn is_over(&self) -> bool {
        self.state.phase.is_terminal()
    }

    pub fn winner(&self) -> Option<Team> {
        self.state.winner
    }
}
