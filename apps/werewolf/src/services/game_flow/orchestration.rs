use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use super::{FlowReport, GameFlowService};
use crate::domain::actions::{apply_action, start_game, Action};
use crate::domain::awaiting::{awaiting, ActorKind, Awaiting};
use crate::domain::effects::Effect;
use crate::domain::game_transition::{derive_game_transitions, GameLifecycleView, GameTransition};
use crate::domain::seed_derivation::{derive_fallback_seed, derive_setup_seed};
use crate::domain::setup::deal_roles;
use crate::domain::state::{GameState, PlayerId};
use crate::error::AppError;
use crate::errors::domain::DomainError;

/// Guard against a transition bug looping forever. A full game is a few
/// hundred steps.
const MAX_STEPS: usize = 5_000;

impl GameFlowService {
    /// Deal a new game and run it until a human is needed or it ends.
    pub async fn start(&mut self) -> Result<FlowReport, AppError> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        self.seed = seed;
        self.fallback_rng = ChaCha8Rng::seed_from_u64(derive_fallback_seed(seed));

        let mut rng = ChaCha8Rng::seed_from_u64(derive_setup_seed(seed));
        let players = deal_roles(self.config.human_count, &mut rng)?;
        self.state = GameState::with_players(players);

        info!(
            seed,
            humans = self.config.human_count,
            ai = %self.config.ai,
            "Starting game"
        );

        let mut report = FlowReport::default();
        let before = GameLifecycleView::of(&self.state);
        let effects = start_game(&mut self.state)?;
        self.record_step(&before, effects, &mut report).await;
        self.process(&mut report).await?;
        report.awaiting = awaiting(&self.state);
        Ok(report)
    }

    /// Run engine steps and computer turns until a human is awaited or the
    /// game is over.
    pub async fn process(&mut self, report: &mut FlowReport) -> Result<(), AppError> {
        for _ in 0..MAX_STEPS {
            match awaiting(&self.state) {
                Awaiting::Idle => return Ok(()),
                Awaiting::Actor {
                    kind: ActorKind::Human,
                    player,
                    task,
                } => {
                    debug!(player, task = ?task, "Waiting for human input");
                    return Ok(());
                }
                Awaiting::Automatic => {
                    self.step(None, Action::Advance, report)
                        .await
                        .inspect_err(|err| warn!(error = %err, phase = ?self.state.phase, "Engine step refused"))?;
                }
                Awaiting::Actor {
                    kind: ActorKind::Computer,
                    player,
                    task,
                } => {
                    self.run_computer_turn(player, task, report).await?;
                }
            }
        }
        Err(AppError::internal(format!(
            "game did not settle after {MAX_STEPS} steps (phase {:?})",
            self.state.phase
        )))
    }

    /// Apply one action and play back its effects.
    pub(super) async fn step(
        &mut self,
        actor: Option<PlayerId>,
        action: Action,
        report: &mut FlowReport,
    ) -> Result<(), DomainError> {
        let before = GameLifecycleView::of(&self.state);
        debug!(
            phase = ?self.state.phase,
            day = self.state.day,
            actor = ?actor,
            action = ?action,
            "Applying action"
        );
        let effects = apply_action(&mut self.state, actor, action)?;
        self.record_step(&before, effects, report).await;
        Ok(())
    }

    async fn record_step(
        &mut self,
        before: &GameLifecycleView,
        effects: Vec<Effect>,
        report: &mut FlowReport,
    ) {
        let after = GameLifecycleView::of(&self.state);
        let transitions = derive_game_transitions(before, &after);
        for transition in &transitions {
            match transition {
                GameTransition::GameEnded { winner } => {
                    info!(winner = %winner, day = self.state.day, "Game over");
                }
                GameTransition::PlayerDied { player_id } => {
                    info!(player = player_id, day = self.state.day, "Player died");
                }
                other => debug!(transition = ?other, "Transition"),
            }
        }
        report.transitions.extend(transitions);
        self.play_effects(effects, report).await;
    }

    /// Publish effects in order, sleeping on pauses.
    ///
    /// `&mut self` is held across every sleep, so nothing else can move the
    /// state mid-step and every effect is delivered.
    async fn play_effects(&self, effects: Vec<Effect>, report: &mut FlowReport) {
        for effect in effects {
            if let Effect::Pause(kind) = effect {
                let delay = self.config.pacing.duration(kind);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
            if let Some(tx) = &self.effect_tx {
                // A closed sink only means nobody is watching.
                let _ = tx.send(effect.clone());
            }
            report.effects.push(effect);
        }
    }
}
