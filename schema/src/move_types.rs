use crate::{BattleStat, Move, PokemonType};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveCategory::Physical => write!(f, "Physical"),
            MoveCategory::Special => write!(f, "Special"),
            MoveCategory::Status => write!(f, "Status"),
        }
    }
}

/// Who an individual effect applies to, relative to the move's user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    User,
    Target,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::User => write!(f, "User"),
            Target::Target => write!(f, "Target"),
        }
    }
}

/// Which battlers a move is aimed at when it is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveTarget {
    /// The user itself.
    User,
    /// One opposing battler, picked with the command.
    SelectedOpponent,
    /// Every opposing battler on the field.
    AllOpponents,
    /// Every battler on the field, both sides.
    BothSides,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MoveEffect {
    // Stat changes
    StatChange(Target, BattleStat, i8), // target, stat, stages

    // Field effects
    Haze, // remove all stat changes of every battler on the field

    // Utility
    Splash, // does nothing
}

impl MoveEffect {
    /// Field-wide effects run once per use, regardless of how many
    /// battlers the move was aimed at.
    pub fn is_field_wide(&self) -> bool {
        matches!(self, MoveEffect::Haze | MoveEffect::Splash)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub id: Move,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    pub power: Option<u8>,
    pub accuracy: Option<u8>, // None never misses
    pub max_pp: u8,
    #[serde(default)]
    pub priority: i8,
    pub target: MoveTarget,
    pub effects: Vec<MoveEffect>,
}
