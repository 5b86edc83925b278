//! Error handling for the werewolf engine.

pub mod domain;

pub use domain::{DomainError, ValidationKind};
