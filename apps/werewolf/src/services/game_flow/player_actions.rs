use tracing::{debug, warn};

use super::{FlowReport, GameFlowService};
use crate::domain::actions::Action;
use crate::domain::awaiting::awaiting;
use crate::domain::state::PlayerId;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};

impl GameFlowService {
    /// Submit a human event and process everything it unblocks.
    ///
    /// Events for the wrong phase or the wrong player are no-ops: the report
    /// carries the reason in `ignored` and the state is untouched.
    pub async fn submit(&mut self, actor: PlayerId, action: Action) -> Result<FlowReport, AppError> {
        let mut report = FlowReport::default();

        let expected = awaiting(&self.state);
        if !expected.is_human() {
            let err = DomainError::validation(
                ValidationKind::OutOfTurn,
                format!("no human input expected ({expected:?})"),
            );
            debug!(actor, action = ?action, error = %err, "Ignoring human event");
            report.ignored = Some(err);
            report.awaiting = expected;
            return Ok(report);
        }

        match self.step(Some(actor), action.clone(), &mut report).await {
            Ok(()) => self.process(&mut report).await?,
            Err(err @ DomainError::Validation(..)) => {
                debug!(actor, action = ?action, error = %err, "Ignoring human event");
                report.ignored = Some(err);
            }
            Err(err) => {
                warn!(actor, action = ?action, error = %err, "Refusing human event");
                report.ignored = Some(err);
            }
        }

        report.awaiting = awaiting(&self.state);
        Ok(report)
    }

    pub async fn acknowledge_role(&mut self, actor: PlayerId) -> Result<FlowReport, AppError> {
        self.submit(actor, Action::AcknowledgeRole).await
    }

    /// Wolves' choice; `None` spares everyone tonight.
    pub async fn wolves_kill(
        &mut self,
        actor: PlayerId,
        target: Option<PlayerId>,
    ) -> Result<FlowReport, AppError> {
        self.submit(actor, Action::Kill { target }).await
    }

    pub async fn witch_save(&mut self, actor: PlayerId) -> Result<FlowReport, AppError> {
        self.submit(actor, Action::Save).await
    }

    pub async fn witch_decline_save(&mut self, actor: PlayerId) -> Result<FlowReport, AppError> {
        self.submit(actor, Action::DeclineSave).await
    }

    pub async fn witch_poison(
        &mut self,
        actor: PlayerId,
        target: Option<PlayerId>,
    ) -> Result<FlowReport, AppError> {
        self.submit(actor, Action::Poison { target }).await
    }

    pub async fn seer_check(
        &mut self,
        actor: PlayerId,
        target: PlayerId,
    ) -> Result<FlowReport, AppError> {
        self.submit(actor, Action::Check { target }).await
    }

    pub async fn acknowledge_vision(&mut self, actor: PlayerId) -> Result<FlowReport, AppError> {
        self.submit(actor, Action::AcknowledgeVision).await
    }

    pub async fn speak(
        &mut self,
        actor: PlayerId,
        text: impl Into<String>,
    ) -> Result<FlowReport, AppError> {
        self.submit(actor, Action::Speak { text: text.into() }).await
    }

    pub async fn vote(&mut self, actor: PlayerId, target: PlayerId) -> Result<FlowReport, AppError> {
        self.submit(
            actor,
            Action::Vote {
                target: Some(target),
            },
        )
        .await
    }

    /// Hunter's revenge; `None` holds fire.
    pub async fn hunter_shoot(
        &mut self,
        actor: PlayerId,
        target: Option<PlayerId>,
    ) -> Result<FlowReport, AppError> {
        self.submit(actor, Action::Shoot { target }).await
    }
}
