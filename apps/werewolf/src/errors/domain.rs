//! Domain-level error type used by the pure rule engines.
//!
//! This error type is IO-agnostic. Services return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Why an action was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// The action does not belong to the current phase.
    PhaseMismatch,
    /// Someone other than the turn-holder tried to act.
    OutOfTurn,
    /// The referenced player id is not in the roster.
    UnknownPlayer,
    /// The referenced player is already dead.
    DeadPlayer,
    /// The potion was already consumed.
    PotionSpent,
    /// The target is not eligible for this action.
    InvalidTarget,
    /// A chat message was blank.
    EmptyMessage,
    /// Game setup parameters are out of range.
    InvalidSetup,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or game-rule violation; the action is ignored.
    Validation(ValidationKind, String),
    /// A state invariant would be broken; the action is refused.
    Invariant(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Invariant(d) => write!(f, "invariant violated: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }

    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }

    /// The validation kind, if this is a validation failure.
    pub fn kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            DomainError::Invariant(_) => None,
        }
    }
}
