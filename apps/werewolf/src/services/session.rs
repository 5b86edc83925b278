//! A running game owned by its own task.
//!
//! The session task is the single writer of the game state. Callers talk to
//! it through a [`SessionHandle`]; commands are processed strictly in arrival
//! order, and every effect the game plays is also streamed on the channel
//! returned by [`GameSession::spawn`].

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::oneshot;
use tracing::{debug, info};

use super::game_flow::{FlowReport, GameFlowService};
use crate::domain::actions::Action;
use crate::domain::effects::Effect;
use crate::domain::state::{GameState, PlayerId};
use crate::error::AppError;

type Reply<T> = oneshot::Sender<Result<T, AppError>>;

enum Command {
    Start(Reply<FlowReport>),
    Submit {
        actor: PlayerId,
        action: Action,
        reply: Reply<FlowReport>,
    },
    Snapshot(oneshot::Sender<GameState>),
    Shutdown,
}

/// Task wrapper around a [`GameFlowService`].
pub struct GameSession {
    service: GameFlowService,
    commands: UnboundedReceiver<Command>,
}

impl GameSession {
    /// Move the service into a new task.
    ///
    /// Returns the handle used to drive it and the receiving end of the
    /// effect stream.
    pub fn spawn(service: GameFlowService) -> (SessionHandle, UnboundedReceiver<Effect>) {
        let (effect_tx, effect_rx) = unbounded_channel();
        let (tx, rx) = unbounded_channel();
        let session = Self {
            service: service.with_effect_sink(effect_tx),
            commands: rx,
        };
        tokio::spawn(session.run());
        (SessionHandle { tx }, effect_rx)
    }

    async fn run(mut self) {
        while let Some(command) = self.commands.recv().await {
            match command {
                Command::Start(reply) => {
                    let _ = reply.send(self.service.start().await);
                }
                Command::Submit {
                    actor,
                    action,
                    reply,
                } => {
                    let _ = reply.send(self.service.submit(actor, action).await);
                }
                Command::Snapshot(reply) => {
                    let _ = reply.send(self.service.state().clone());
                }
                Command::Shutdown => break,
            }
        }
        info!(
            seed = self.service.seed(),
            phase = ?self.service.state().phase,
            "Session closed"
        );
    }
}

/// Cloneable front end of a running session.
#[derive(Clone)]
pub struct SessionHandle {
    tx: UnboundedSender<Command>,
}

impl SessionHandle {
    /// Deal the game and run it until a human is needed.
    pub async fn start(&self) -> Result<FlowReport, AppError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Start(reply))?;
        Self::receive(rx).await?
    }

    pub async fn submit(&self, actor: PlayerId, action: Action) -> Result<FlowReport, AppError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Submit {
            actor,
            action,
            reply,
        })?;
        Self::receive(rx).await?
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> Result<GameState, AppError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot(reply))?;
        Self::receive(rx).await
    }

    /// Stop the session after the commands already queued.
    pub fn shutdown(&self) {
        debug!("Session shutdown requested");
        let _ = self.tx.send(Command::Shutdown);
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    fn send(&self, command: Command) -> Result<(), AppError> {
        self.tx
            .send(command)
            .map_err(|_| AppError::internal("game session has shut down"))
    }

    async fn receive<T>(rx: oneshot::Receiver<T>) -> Result<T, AppError> {
        rx.await
            .map_err(|_| AppError::internal("game session dropped the request"))
    }
}
