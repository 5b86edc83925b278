//! Decision collaborator trait definition.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::player_view::PlayerView;
use crate::domain::state::PlayerId;

/// Errors that can occur during a computer player's decision.
#[derive(Debug, Clone)]
pub enum AiError {
    /// Collaborator failed to answer in time
    Timeout,
    /// Collaborator encountered an internal error (network, lock, ...)
    Internal(String),
    /// Collaborator answered with something unusable
    InvalidResponse(String),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::Timeout => write!(f, "decision timeout"),
            AiError::Internal(msg) => write!(f, "decision internal error: {msg}"),
            AiError::InvalidResponse(msg) => write!(f, "invalid decision: {msg}"),
        }
    }
}

impl std::error::Error for AiError {}

/// What the collaborator is asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    /// Wolves' victim; also used for the Hunter's shot.
    Kill,
    /// `Some(victim)` uses the save potion, `None` declines.
    Save,
    /// `None` keeps the potion.
    Poison,
    Check,
    /// `None` abstains.
    Vote,
    Speak,
}

/// A single decision request for one acting player.
#[derive(Debug, Clone)]
pub struct DecisionRequest {
    pub kind: ActionKind,
    pub view: PlayerView,
}

/// Structured answer for every kind except `Speak`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetChoice {
    #[serde(rename = "targetId", default)]
    pub target: Option<PlayerId>,
    #[serde(default)]
    pub reason: String,
}

impl TargetChoice {
    pub fn new(target: Option<PlayerId>, reason: impl Into<String>) -> Self {
        Self {
            target,
            reason: reason.into(),
        }
    }

    /// Parse a `{"targetId": .., "reason": ..}` payload.
    pub fn from_json(raw: &str) -> Result<Self, AiError> {
        serde_json::from_str(raw).map_err(|e| AiError::InvalidResponse(e.to_string()))
    }
}

/// Trait for computer player decision makers.
///
/// Implementations receive the acting player's [`PlayerView`] and answer one
/// request at a time. They may fail; the orchestrator substitutes a fallback
/// and never retries.
#[async_trait]
pub trait DecisionMaker: Send + Sync {
    /// Choose a target (or none) for a non-speech action.
    async fn choose_target(&self, request: &DecisionRequest) -> Result<TargetChoice, AiError>;

    /// Produce one line of discussion.
    async fn compose_speech(&self, request: &DecisionRequest) -> Result<String, AiError>;
}
