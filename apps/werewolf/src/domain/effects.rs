//! Outbound effects produced alongside each state transition.
//!
//! Transitions never speak, render, or sleep themselves; they return these
//! commands in order and a presentation collaborator plays them back.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::roles::{Role, Team};
use crate::domain::state::{GameLogEntry, GameState, LogKind, PlayerId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Effect {
    /// Text for the narrator voice.
    Narrate(String),
    /// A log entry that was just appended.
    Logged(GameLogEntry),
    /// Pacing delay before the next line plays.
    Pause(PauseKind),
    /// Private: show a human their role card.
    RevealRole { player: PlayerId, role: Role },
    /// Private: show the seer what they learned.
    SeerVision {
        seer: PlayerId,
        target: PlayerId,
        team: Team,
    },
    GameOver { winner: Team },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PauseKind {
    /// Between night sub-phases ("close your eyes").
    NightStep,
    /// After the dawn announcement.
    Dawn,
    /// After the vote result.
    Verdict,
    /// Before the hunter's shot lands.
    Revenge,
    /// Read time for a spoken line of `chars` characters.
    Speech { chars: usize },
}

/// Pause durations. All zero disables pacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pacing {
    pub night_step_ms: u64,
    pub dawn_ms: u64,
    pub verdict_ms: u64,
    pub revenge_ms: u64,
    pub speech_base_ms: u64,
    pub speech_per_char_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            night_step_ms: 4000,
            dawn_ms: 6000,
            verdict_ms: 3000,
            revenge_ms: 2000,
            speech_base_ms: 1500,
            speech_per_char_ms: 50,
        }
    }
}

impl Pacing {
    pub const fn instant() -> Self {
        Self {
            night_step_ms: 0,
            dawn_ms: 0,
            verdict_ms: 0,
            revenge_ms: 0,
            speech_base_ms: 0,
            speech_per_char_ms: 0,
        }
    }

    pub fn scaled(self, factor: f64) -> Self {
        let s = |ms: u64| (ms as f64 * factor.max(0.0)).round() as u64;
        Self {
            night_step_ms: s(self.night_step_ms),
            dawn_ms: s(self.dawn_ms),
            verdict_ms: s(self.verdict_ms),
            revenge_ms: s(self.revenge_ms),
            speech_base_ms: s(self.speech_base_ms),
            speech_per_char_ms: s(self.speech_per_char_ms),
        }
    }

    pub fn duration(&self, kind: PauseKind) -> Duration {
        let ms = match kind {
            PauseKind::NightStep => self.night_step_ms,
            PauseKind::Dawn => self.dawn_ms,
            PauseKind::Verdict => self.verdict_ms,
            PauseKind::Revenge => self.revenge_ms,
            PauseKind::Speech { chars } => self
                .speech_base_ms
                .saturating_add(self.speech_per_char_ms.saturating_mul(chars as u64)),
        };
        Duration::from_millis(ms)
    }
}

/// Append a log entry and echo it as an effect.
pub(crate) fn record(
    state: &mut GameState,
    fx: &mut Vec<Effect>,
    kind: LogKind,
    author: Option<String>,
    content: impl Into<String>,
) {
    let entry = state.log.push(kind, author, content).clone();
    fx.push(Effect::Logged(entry));
}

pub(crate) fn system(state: &mut GameState, fx: &mut Vec<Effect>, content: impl Into<String>) {
    record(state, fx, LogKind::System, None, content);
}

pub(crate) fn narrate(fx: &mut Vec<Effect>, text: impl Into<String>) {
    fx.push(Effect::Narrate(text.into()));
}
