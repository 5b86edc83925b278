use async_trait::async_trait;

use super::trait_def::{AiError, DecisionMaker, DecisionRequest, TargetChoice};

/// A collaborator that never answers.
///
/// Every request fails with [`AiError::Timeout`], so every computer decision
/// goes through the fallback path. Useful for exercising degraded play.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentDecider;

impl SilentDecider {
    pub const NAME: &'static str = "silent";
    pub const VERSION: &'static str = "1.0.0";
}

#[async_trait]
impl DecisionMaker for SilentDecider {
    async fn choose_target(&self, _request: &DecisionRequest) -> Result<TargetChoice, AiError> {
        Err(AiError::Timeout)
    }

    async fn compose_speech(&self, _request: &DecisionRequest) -> Result<String, AiError> {
        Err(AiError::Timeout)
    }
}
