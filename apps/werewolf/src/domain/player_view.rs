//! Player view of game state - what information is visible to one player.
//!
//! This module provides [`PlayerView`], the snapshot handed to a
//! [`crate::ai::DecisionMaker`] at a decision point. Hidden roles are masked
//! according to who is looking.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::roles::{Personality, Role, Team};
use crate::domain::state::{GameState, Phase, PlayerId, WitchPotions};

/// One seat as seen by the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisiblePlayer {
    pub id: PlayerId,
    pub personality: Personality,
    pub is_human: bool,
    pub is_alive: bool,
    /// `Some` only for the viewer themselves, and for fellow werewolves when
    /// the viewer is a werewolf.
    pub role: Option<Role>,
}

/// Information visible to a player at a decision point.
///
/// This is the primary interface between the game engine and computer
/// players. It contains everything the acting player may know at that point.
///
/// # For AI Developers
///
/// - **Who you are**: [`me`](Self::me) and [`my_role`](Self::my_role)
/// - **Who is still in**: [`living_targets()`](Self::living_targets)
/// - **What happened**: [`recent_log`](Self::recent_log), oldest first
/// - **Private night info**: [`night_info`](Self::night_info), e.g. the wolves'
///   victim when you are the Witch
/// - **What you have seen**: [`seer_findings`](Self::seer_findings) when you
///   are the Seer
///
/// Never assume a target is valid because it appears in `players`; dead seats
/// are listed too. Use [`living_targets()`](Self::living_targets).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub me: PlayerId,
    pub my_role: Role,
    pub phase: Phase,
    pub day: u32,
    pub players: Vec<VisiblePlayer>,
    pub recent_log: Vec<String>,
    /// Role-private information for this night, as prose.
    pub night_info: Option<String>,
    /// The wolves' victim; only shown to the Witch during her turn.
    pub attacked: Option<PlayerId>,
    /// Remaining potions; only populated for the Witch.
    pub potions: Option<WitchPotions>,
    /// Every inspection so far, target → team; only populated for the Seer.
    pub seer_findings: Option<BTreeMap<PlayerId, Team>>,
}

impl PlayerView {
    /// Build the view for `viewer`, or `None` if no such player exists.
    pub fn for_player(state: &GameState, viewer: PlayerId, log_lines: usize) -> Option<Self> {
        let me = state.player(viewer)?;
        let players = state
            .players
            .iter()
            .map(|p| {
                let visible = p.id == me.id
                    || (me.role == Role::Werewolf && p.role == Role::Werewolf);
                VisiblePlayer {
                    id: p.id,
                    personality: p.personality,
                    is_human: p.is_human,
                    is_alive: p.is_alive,
                    role: visible.then_some(p.role),
                }
            })
            .collect();

        Some(Self {
            me: me.id,
            my_role: me.role,
            phase: state.phase,
            day: state.day,
            players,
            recent_log: state.log.recent(log_lines),
            night_info: night_info(state, me.role),
            attacked: (state.phase == Phase::NightWitch && me.role == Role::Witch)
                .then_some(state.night.wolves_target)
                .flatten(),
            potions: (me.role == Role::Witch).then_some(state.potions),
            seer_findings: (me.role == Role::Seer).then(|| state.seer_findings.clone()),
        })
    }

    /// Living players other than the viewer, ascending id.
    pub fn living_targets(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.is_alive && p.id != self.me)
            .map(|p| p.id)
            .collect()
    }

    /// Known fellow werewolves (empty unless the viewer is one).
    pub fn known_wolves(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.id != self.me && p.role == Some(Role::Werewolf))
            .map(|p| p.id)
            .collect()
    }
}

fn night_info(state: &GameState, role: Role) -> Option<String> {
    match (state.phase, role) {
        (Phase::NightWitch, Role::Witch) => Some(match state.night.wolves_target {
            Some(victim) => format!("Werewolves attacked Player {victim} tonight."),
            None => "Nobody was attacked tonight.".to_string(),
        }),
        (Phase::NightSeer, Role::Seer) => match (state.night.seer_check, state.night.seer_result) {
            (Some(target), Some(team)) => {
                Some(format!("Player {target} belongs to the {team} team."))
            }
            _ => None,
        },
        _ => None,
    }
}
