#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod services;
pub mod telemetry;


// Re-exports for public API
pub use config::GameConfig;
pub use error::AppError;
pub use errors::domain::{DomainError, ValidationKind};
pub use services::game_flow::{FlowReport, GameFlowService};
pub use services::session::{GameSession, SessionHandle};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
