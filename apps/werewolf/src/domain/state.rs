use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::roles::{Personality, Role, Team};
use crate::errors::domain::{DomainError, ValidationKind};

/// Seat number, 1-based and unique within a game. Also the turn-order key.
pub type PlayerId = u8;

/// Overall game progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub enum Phase {
    /// Roles not yet assigned.
    Setup,
    /// Human players view their role card one at a time.
    Reveal,
    NightWerewolf,
    NightWitch,
    NightSeer,
    /// Dawn: the night's deaths are announced and applied.
    DayAnnounce,
    /// Alive players speak once each, in id order.
    DayDiscuss,
    DayVote,
    /// A dying Hunter picks a revenge target.
    HunterAction,
    /// Terminal.
    GameOver,
}

impl Phase {
    pub const fn is_night(self) -> bool {
        matches!(
            self,
            Phase::NightWerewolf | Phase::NightWitch | Phase::NightSeer
        )
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub role: Role,
    pub personality: Personality,
    pub is_human: bool,
    /// Monotonic: flips to false once, never back.
    pub is_alive: bool,
}

impl Player {
    pub fn label(&self) -> String {
        format!("Player {}", self.id)
    }

    pub fn team(&self) -> Team {
        self.role.team()
    }
}

/// Witch's single-use resources. `true` means still available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WitchPotions {
    pub save: bool,
    pub poison: bool,
}

impl Default for WitchPotions {
    fn default() -> Self {
        Self {
            save: true,
            poison: true,
        }
    }
}

impl WitchPotions {
    pub fn consume_save(&mut self) -> Result<(), DomainError> {
        if !self.save {
            return Err(DomainError::validation(
                ValidationKind::PotionSpent,
                "save potion already used",
            ));
        }
        self.save = false;
        Ok(())
    }

    pub fn consume_poison(&mut self) -> Result<(), DomainError> {
        if !self.poison {
            return Err(DomainError::validation(
                ValidationKind::PotionSpent,
                "poison potion already used",
            ));
        }
        self.poison = false;
        Ok(())
    }
}

/// Which offer the Witch is currently looking at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum WitchStep {
    #[default]
    Save,
    Poison,
}

/// Per-cycle scratch, reset when a new werewolf night begins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NightActionData {
    pub wolves_target: Option<PlayerId>,
    pub seer_check: Option<PlayerId>,
    pub seer_result: Option<Team>,
    pub witch_save_used: bool,
    pub witch_poison_target: Option<PlayerId>,
    pub witch_step: WitchStep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogKind {
    System,
    Chat,
    Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameLogEntry {
    pub id: u64,
    pub kind: LogKind,
    pub author: Option<String>,
    pub content: String,
}

/// Append-only game record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GameLog {
    entries: Vec<GameLogEntry>,
}

impl GameLog {
    pub fn push(
        &mut self,
        kind: LogKind,
        author: Option<String>,
        content: impl Into<String>,
    ) -> &GameLogEntry {
        let id = self.entries.len() as u64 + 1;
        self.entries.push(GameLogEntry {
            id,
            kind,
            author,
            content: content.into(),
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[GameLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Content of the most recent `n` entries, oldest first. Chat lines are
    /// prefixed with their author.
    pub fn recent(&self, n: usize) -> Vec<String> {
        let start = self.entries.len().saturating_sub(n);
        self.entries[start..]
            .iter()
            .map(|e| match &e.author {
                Some(author) => format!("{author}: {}", e.content),
                None => e.content.clone(),
            })
            .collect()
    }
}

/// Aggregate root. Owned by the orchestrator; everything else reads snapshots.
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub players: Vec<Player>,
    pub phase: Phase,
    /// Starts at 1, increments on every entry into `DayDiscuss`.
    pub day: u32,
    pub log: GameLog,
    pub potions: WitchPotions,
    pub night: NightActionData,
    /// Seer's past inspections, target → team. Survives the night reset and
    /// is only ever shown to the Seer.
    pub seer_findings: BTreeMap<PlayerId, Team>,
    /// voter → target, humans only.
    pub human_votes: BTreeMap<PlayerId, PlayerId>,
    /// voter → target, computer players; `None` is an abstention.
    pub computer_votes: BTreeMap<PlayerId, Option<PlayerId>>,
    /// Player whose turn it is (reveal, speaker, hunter).
    pub turn: Option<PlayerId>,
    /// Phase a Hunter detour returns to.
    pub resume_phase: Option<Phase>,
    pub winner: Option<Team>,
}

impl GameState {
    /// Fresh game in `Setup` with no roster.
    pub fn new() -> Self {
        let mut log = GameLog::default();
        log.push(
            LogKind::System,
            None,
            "Welcome to Werewolf. Configure the game to start.",
        );
        Self {
            players: Vec::new(),
            phase: Phase::Setup,
            day: 1,
            log,
            potions: WitchPotions::default(),
            night: NightActionData::default(),
            seer_findings: BTreeMap::new(),
            human_votes: BTreeMap::new(),
            computer_votes: BTreeMap::new(),
            turn: None,
            resume_phase: None,
            winner: None,
        }
    }

    /// Game in `Setup` with the given roster already dealt.
    pub fn with_players(players: Vec<Player>) -> Self {
        Self {
            players,
            ..Self::new()
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn alive(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive)
    }

    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.player(id).is_some_and(|p| p.is_alive)
    }

    /// First living player holding `role`, by id.
    pub fn living_with_role(&self, role: Role) -> Option<&Player> {
        self.alive()
            .filter(|p| p.role == role)
            .min_by_key(|p| p.id)
    }

    pub fn living_wolves(&self) -> impl Iterator<Item = &Player> {
        self.alive().filter(|p| p.role == Role::Werewolf)
    }

    pub fn living_humans(&self) -> impl Iterator<Item = &Player> {
        self.alive().filter(|p| p.is_human)
    }

    /// Look up a player that must exist and be alive.
    pub fn require_living(&self, id: PlayerId) -> Result<&Player, DomainError> {
        let player = self.player(id).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::UnknownPlayer,
                format!("no player with id {id}"),
            )
        })?;
        if !player.is_alive {
            return Err(DomainError::validation(
                ValidationKind::DeadPlayer,
                format!("player {id} is dead"),
            ));
        }
        Ok(player)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn require_turn(state: &GameState, ctx: &'static str) -> Result<PlayerId, DomainError> {
    state
        .turn
        .ok_or_else(|| DomainError::invariant(format!("turn must be set ({ctx})")))
}
