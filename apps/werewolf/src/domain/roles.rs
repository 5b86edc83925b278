use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of seats in the standard setup.
pub const PLAYERS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Werewolf,
    Villager,
    Seer,
    Witch,
    Hunter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Good,
    Bad,
}

/// Standard 9-player setup, in deal order before shuffling.
pub const STANDARD_ROLES: [Role; PLAYERS] = [
    Role::Werewolf,
    Role::Werewolf,
    Role::Werewolf,
    Role::Villager,
    Role::Villager,
    Role::Villager,
    Role::Seer,
    Role::Witch,
    Role::Hunter,
];

impl Role {
    pub const fn team(self) -> Team {
        match self {
            Role::Werewolf => Team::Bad,
            Role::Villager | Role::Seer | Role::Witch | Role::Hunter => Team::Good,
        }
    }

    /// Seer, Witch and Hunter: the Good team's specialists.
    pub const fn is_god(self) -> bool {
        matches!(self, Role::Seer | Role::Witch | Role::Hunter)
    }

    /// Text shown on the private role card.
    pub const fn description(self) -> &'static str {
        match self {
            Role::Werewolf => "You are a Werewolf. Each night, wake up and choose a victim to kill. Win when the good guys are outnumbered.",
            Role::Villager => "You are a Villager. You have no special abilities. Find the wolves during the day and vote them out.",
            Role::Seer => "You are the Seer. Each night, you can check the identity of one player to see if they are Good or Bad.",
            Role::Witch => "You are the Witch. You have two potions: one to save a victim, one to poison a player. You can use each once.",
            Role::Hunter => "You are the Hunter. If you die (except by poison), you can take one person with you.",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Werewolf => "Werewolf",
            Role::Villager => "Villager",
            Role::Seer => "Seer",
            Role::Witch => "Witch",
            Role::Hunter => "Hunter",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Good => f.write_str("Good"),
            Team::Bad => f.write_str("Bad"),
        }
    }
}

/// Flavour label handed to the decision collaborator. No mechanical effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Personality {
    Aggressive,
    Cautious,
    Deceptive,
    Logical,
    Emotional,
    Chaotic,
    Quiet,
    Analytical,
    Paranoid,
    Noble,
}

impl Personality {
    pub const ALL: [Personality; 10] = [
        Personality::Aggressive,
        Personality::Cautious,
        Personality::Deceptive,
        Personality::Logical,
        Personality::Emotional,
        Personality::Chaotic,
        Personality::Quiet,
        Personality::Analytical,
        Personality::Paranoid,
        Personality::Noble,
    ];
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
