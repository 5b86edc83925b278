use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{FlowReport, GameFlowService};
use crate::ai::{
    fallback, fallback_choice, validate_choice, ActionKind, AiError, DecisionRequest,
    TargetChoice, FALLBACK_SPEECH,
};
use crate::domain::actions::Action;
use crate::domain::awaiting::Task;
use crate::domain::player_view::PlayerView;
use crate::domain::state::PlayerId;
use crate::error::AppError;
use crate::errors::domain::DomainError;

impl GameFlowService {
    /// Ask the collaborator for one computer player's move and apply it.
    ///
    /// Holds the decision gate for the whole turn. A failed or unusable answer
    /// is replaced by the fallback.
    pub(super) async fn run_computer_turn(
        &mut self,
        player: PlayerId,
        task: Task,
        report: &mut FlowReport,
    ) -> Result<(), AppError> {
        let _ticket = self
            .gate
            .try_acquire()
            .ok_or_else(|| AppError::internal("a computer decision is already in flight"))?;

        info!(player, task = ?task, phase = ?self.state.phase, "Processing computer turn");

        // The service stays mutably borrowed while the collaborator thinks, so
        // the answer always applies to the state it was asked about.
        let action = self.decide(player, task, report).await?;

        match self.step(Some(player), action.clone(), report).await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(player, action = ?action, error = %err, "Computer action refused; using fallback");
                let fallback = self.fallback_action(player, task, report)?;
                self.step(Some(player), fallback, report)
                    .await
                    .map_err(AppError::from)
            }
        }
    }

    async fn decide(
        &mut self,
        player: PlayerId,
        task: Task,
        report: &mut FlowReport,
    ) -> Result<Action, AppError> {
        let action = match task {
            Task::Speak => Action::Speak {
                text: self.speech(player, report).await?,
            },
            Task::Kill => Action::Kill {
                target: self.target(player, ActionKind::Kill, report).await?.target,
            },
            Task::Save => match self.target(player, ActionKind::Save, report).await?.target {
                Some(_) => Action::Save,
                None => Action::DeclineSave,
            },
            Task::Poison => Action::Poison {
                target: self.target(player, ActionKind::Poison, report).await?.target,
            },
            Task::Check => {
                let choice = self.target(player, ActionKind::Check, report).await?;
                let target = choice.target.ok_or_else(|| {
                    DomainError::invariant(format!("seer {player} has nobody to inspect"))
                })?;
                Action::Check { target }
            }
            Task::Vote => Action::Vote {
                target: self.target(player, ActionKind::Vote, report).await?.target,
            },
            Task::Shoot => Action::Shoot {
                target: self.target(player, ActionKind::Kill, report).await?.target,
            },
            Task::AcknowledgeRole | Task::AcknowledgeVision => {
                return Err(DomainError::invariant(format!(
                    "{task:?} is never asked of a computer player"
                ))
                .into());
            }
        };
        Ok(action)
    }

    fn view_for(&self, player: PlayerId, kind: ActionKind) -> Result<PlayerView, DomainError> {
        let lines = match kind {
            ActionKind::Speak => self.config.speech_context,
            _ => self.config.action_context,
        };
        PlayerView::for_player(&self.state, player, lines)
            .ok_or_else(|| DomainError::invariant(format!("player {player} vanished")))
    }

    async fn target(
        &mut self,
        player: PlayerId,
        kind: ActionKind,
        report: &mut FlowReport,
    ) -> Result<TargetChoice, AppError> {
        let request = DecisionRequest {
            kind,
            view: self.view_for(player, kind)?,
        };
        let decider = Arc::clone(&self.decider);
        let answer = tokio::time::timeout(
            self.config.decision_timeout(),
            decider.choose_target(&request),
        )
        .await
        .unwrap_or(Err(AiError::Timeout))
        .and_then(|choice| validate_choice(kind, &request.view, choice));

        match answer {
            Ok(choice) => {
                debug!(
                    player,
                    kind = ?kind,
                    target = ?choice.target,
                    reason = %choice.reason,
                    "Decision received"
                );
                Ok(choice)
            }
            Err(err) => {
                warn!(player, kind = ?kind, error = %err, "Decision failed; using fallback");
                report.fallbacks += 1;
                Ok(fallback_choice(kind, &request.view, &mut self.fallback_rng))
            }
        }
    }

    async fn speech(&mut self, player: PlayerId, report: &mut FlowReport) -> Result<String, AppError> {
        let request = DecisionRequest {
            kind: ActionKind::Speak,
            view: self.view_for(player, ActionKind::Speak)?,
        };
        let decider = Arc::clone(&self.decider);
        let answer = tokio::time::timeout(
            self.config.decision_timeout(),
            decider.compose_speech(&request),
        )
        .await
        .unwrap_or(Err(AiError::Timeout))
        .and_then(fallback::validate_speech);

        match answer {
            Ok(text) => Ok(text),
            Err(err) => {
                warn!(player, error = %err, "Speech failed; using fallback line");
                report.fallbacks += 1;
                Ok(FALLBACK_SPEECH.to_string())
            }
        }
    }

    fn fallback_action(
        &mut self,
        player: PlayerId,
        task: Task,
        report: &mut FlowReport,
    ) -> Result<Action, AppError> {
        report.fallbacks += 1;
        let kind = match task {
            Task::Speak => {
                return Ok(Action::Speak {
                    text: FALLBACK_SPEECH.to_string(),
                })
            }
            Task::Save => return Ok(Action::DeclineSave),
            Task::Poison => return Ok(Action::Poison { target: None }),
            Task::Kill | Task::Shoot => ActionKind::Kill,
            Task::Check => ActionKind::Check,
            Task::Vote => ActionKind::Vote,
            Task::AcknowledgeRole | Task::AcknowledgeVision => {
                return Err(DomainError::invariant(format!(
                    "{task:?} is never asked of a computer player"
                ))
                .into());
            }
        };
        let view = self.view_for(player, kind)?;
        let target = fallback_choice(kind, &view, &mut self.fallback_rng).target;
        let action = match task {
            Task::Kill => Action::Kill { target },
            Task::Shoot => Action::Shoot { target },
            Task::Vote => Action::Vote { target },
            _ => Action::Check {
                target: target.ok_or_else(|| {
                    DomainError::invariant(format!("seer {player} has nobody to inspect"))
                })?,
            },
        };
        Ok(action)
    }
}
