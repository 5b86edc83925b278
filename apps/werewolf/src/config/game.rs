use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ai::AiConfig;
use crate::domain::effects::Pacing;
use crate::domain::roles::PLAYERS;
use crate::error::AppError;

/// Everything needed to set up and run one game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seats `1..=human_count` are human.
    pub human_count: u8,
    /// Game seed; `None` draws one from OS entropy at start.
    pub seed: Option<u64>,
    /// Registry name of the decision maker.
    pub ai: String,
    pub ai_config: AiConfig,
    /// Log lines handed to the collaborator for SPEAK.
    pub speech_context: usize,
    /// Log lines handed to the collaborator for every other kind.
    pub action_context: usize,
    /// A collaborator slower than this is treated as failed.
    pub decision_timeout_ms: u64,
    pub pacing: Pacing,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            human_count: 1,
            seed: None,
            ai: "random".to_string(),
            ai_config: AiConfig::default(),
            speech_context: 10,
            action_context: 5,
            decision_timeout_ms: 30_000,
            pacing: Pacing::default(),
        }
    }
}

impl GameConfig {
    /// Load from `WEREWOLF_*` environment variables over the defaults.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load using an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(humans) = parsed::<u8>(&lookup, "WEREWOLF_HUMANS")? {
            if humans as usize > PLAYERS {
                return Err(AppError::config(format!(
                    "WEREWOLF_HUMANS must be between 0 and {PLAYERS}, got {humans}"
                )));
            }
            config.human_count = humans;
        }
        config.seed = parsed(&lookup, "WEREWOLF_SEED")?;
        if let Some(ai) = lookup("WEREWOLF_AI").filter(|s| !s.trim().is_empty()) {
            config.ai = ai.trim().to_string();
        }
        if let Some(raw) = lookup("WEREWOLF_AI_CONFIG") {
            let json: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
                AppError::config(format!("WEREWOLF_AI_CONFIG is not valid JSON: {e}"))
            })?;
            config.ai_config = AiConfig::from_json(Some(&json));
        }
        if let Some(n) = parsed(&lookup, "WEREWOLF_SPEECH_CONTEXT")? {
            config.speech_context = n;
        }
        if let Some(n) = parsed(&lookup, "WEREWOLF_ACTION_CONTEXT")? {
            config.action_context = n;
        }
        if let Some(ms) = parsed(&lookup, "WEREWOLF_DECISION_TIMEOUT_MS")? {
            config.decision_timeout_ms = ms;
        }

        if lookup("WEREWOLF_PACING").is_some_and(|v| v.trim().eq_ignore_ascii_case("off")) {
            config.pacing = Pacing::instant();
        } else if let Some(factor) = parsed::<f64>(&lookup, "WEREWOLF_PACING_SCALE")? {
            if !factor.is_finite() || factor < 0.0 {
                return Err(AppError::config(format!(
                    "WEREWOLF_PACING_SCALE must be a non-negative number, got {factor}"
                )));
            }
            config.pacing = config.pacing.scaled(factor);
        }

        Ok(config)
    }

    pub fn decision_timeout(&self) -> Duration {
        Duration::from_millis(self.decision_timeout_ms)
    }

    /// Headless preset: no humans, no pauses.
    pub fn headless(seed: Option<u64>, ai: &str) -> Self {
        Self {
            human_count: 0,
            seed,
            ai: ai.to_string(),
            pacing: Pacing::instant(),
            ..Self::default()
        }
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| AppError::config(format!("{name}={raw:?} is invalid: {e}"))),
    }
}
