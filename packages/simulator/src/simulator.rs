//! Headless game runner: one all-computer game per call, no pauses.

use std::time::Instant;

use serde::Serialize;
use werewolf::ai::{create_decider, AiConfig};
use werewolf::domain::roles::Team;
use werewolf::{AppError, FlowReport, GameConfig, GameFlowService};

/// Outcome of one simulated game.
#[derive(Debug, Clone, Serialize)]
pub struct GameResult {
    pub game: u32,
    pub seed: u64,
    pub winner: Option<Team>,
    /// Value of the day counter when the game ended.
    pub days: u32,
    pub deaths: usize,
    pub log_entries: usize,
    pub fallbacks: usize,
    #[serde(skip)]
    pub duration_ms: f64,
}

pub struct Simulator {
    ai: String,
}

impl Simulator {
    pub fn new(ai: impl Into<String>) -> Self {
        Self { ai: ai.into() }
    }

    pub async fn simulate_game(&self, game: u32, seed: u64) -> Result<GameResult, AppError> {
        let started = Instant::now();

        let mut config = GameConfig::headless(Some(seed), &self.ai);
        config.ai_config = AiConfig::with_seed(seed);
        let decider = create_decider(&config.ai, &config.ai_config)
            .ok_or_else(|| AppError::config(format!("unknown AI '{}'", self.ai)))?;

        let mut service = GameFlowService::new(config, decider);
        let report: FlowReport = service.start().await?;
        if !service.is_over() {
            return Err(AppError::internal(format!(
                "game {game} stopped in {:?} waiting on {:?}",
                service.state().phase,
                report.awaiting
            )));
        }

        let state = service.state();
        Ok(GameResult {
            game,
            seed,
            winner: state.winner,
            days: state.day,
            deaths: state.players.iter().filter(|p| !p.is_alive).count(),
            log_entries: state.log.len(),
            fallbacks: report.fallbacks,
            duration_ms: started.elapsed().as_secs_f64() * 1000.0,
        })
    }
}
