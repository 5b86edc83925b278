#![allow(dead_code)]

pub mod roster;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};
use werewolf::ai::{ActionKind, AiError, DecisionMaker, DecisionRequest, TargetChoice};
use werewolf::domain::actions::start_game;
use werewolf::domain::state::{GameState, PlayerId};
use werewolf::{FlowReport, GameConfig, GameFlowService};

#[allow(unused_imports)]
pub use roster::{kill, roster_with_humans, state_in};

static LOGGING: OnceCell<()> = OnceCell::new();

// Logging is auto-installed for every test binary that pulls in `common`.
// Level precedence: TEST_LOG, then RUST_LOG, then "warn".
#[ctor::ctor]
fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Decision maker that answers from a fixed script.
///
/// Kinds without a scripted answer get `None`; speeches get a fixed line.
/// Every request is recorded so tests can assert on what was asked.
#[derive(Default)]
pub struct ScriptedDecider {
    answers: HashMap<ActionKind, Option<PlayerId>>,
    speech: Option<String>,
    pub asked: Mutex<Vec<(PlayerId, ActionKind)>>,
}

impl ScriptedDecider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, kind: ActionKind, target: Option<PlayerId>) -> Self {
        self.answers.insert(kind, target);
        self
    }

    pub fn speech(mut self, text: &str) -> Self {
        self.speech = Some(text.to_string());
        self
    }

    pub fn asked(&self) -> Vec<(PlayerId, ActionKind)> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl DecisionMaker for ScriptedDecider {
    async fn choose_target(&self, request: &DecisionRequest) -> Result<TargetChoice, AiError> {
        self.asked
            .lock()
            .unwrap()
            .push((request.view.me, request.kind));
        let target = self.answers.get(&request.kind).copied().flatten();
        Ok(TargetChoice::new(target, "scripted"))
    }

    async fn compose_speech(&self, request: &DecisionRequest) -> Result<String, AiError> {
        self.asked
            .lock()
            .unwrap()
            .push((request.view.me, request.kind));
        Ok(self
            .speech
            .clone()
            .unwrap_or_else(|| format!("Player {} has nothing to add.", request.view.me)))
    }
}

/// Decision maker that always fails with the given error.
pub struct FailingDecider(pub AiError);

#[async_trait]
impl DecisionMaker for FailingDecider {
    async fn choose_target(&self, _request: &DecisionRequest) -> Result<TargetChoice, AiError> {
        Err(self.0.clone())
    }

    async fn compose_speech(&self, _request: &DecisionRequest) -> Result<String, AiError> {
        Err(self.0.clone())
    }
}

/// Decision maker that answers only after `delay`.
pub struct SlowDecider {
    pub delay: Duration,
}

#[async_trait]
impl DecisionMaker for SlowDecider {
    async fn choose_target(&self, request: &DecisionRequest) -> Result<TargetChoice, AiError> {
        tokio::time::sleep(self.delay).await;
        let target = request.view.living_targets().first().copied();
        Ok(TargetChoice::new(target, "eventually"))
    }

    async fn compose_speech(&self, _request: &DecisionRequest) -> Result<String, AiError> {
        tokio::time::sleep(self.delay).await;
        Ok("Sorry I'm late.".to_string())
    }
}

/// Headless config with humans allowed and no pauses.
pub fn test_config() -> GameConfig {
    GameConfig::headless(Some(42), "scripted")
}

/// Standard roster (1-3 wolves, 4-6 villagers, 7 seer, 8 witch, 9 hunter)
/// with `humans` marked human, started and run until the first human input.
pub async fn started_table(
    humans: &[PlayerId],
    config: GameConfig,
    decider: Arc<dyn DecisionMaker>,
) -> (GameFlowService, FlowReport) {
    let mut state = GameState::with_players(roster_with_humans(humans));
    start_game(&mut state).expect("standard roster starts");
    let mut service = GameFlowService::resume(config, decider, state);
    let mut report = FlowReport::default();
    service
        .process(&mut report)
        .await
        .expect("engine runs to the first human input");
    report.awaiting = service.awaiting();
    (service, report)
}

/// Service resumed from a hand-built state, without processing.
pub fn table_in(
    state: GameState,
    config: GameConfig,
    decider: Arc<dyn DecisionMaker>,
) -> GameFlowService {
    GameFlowService::resume(config, decider, state)
}
