use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumCount, EnumIter, EnumString, IntoStaticStr};

/// The seven stats that carry an in-battle stage modifier.
///
/// The discriminant doubles as the index into a stage table, and the
/// `IntoStaticStr` form (`"ATK"`, `"SPDEF"`, ...) is the key used by the
/// `battleStat` localization namespace.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumCount,
    EnumString,
    IntoStaticStr,
)]
pub enum BattleStat {
    #[strum(serialize = "ATK")]
    Atk = 0,
    #[strum(serialize = "DEF")]
    Def = 1,
    #[strum(serialize = "SPATK")]
    SpAtk = 2,
    #[strum(serialize = "SPDEF")]
    SpDef = 3,
    #[strum(serialize = "SPD")]
    Spd = 4,
    #[strum(serialize = "ACC")]
    Acc = 5,
    #[strum(serialize = "EVA")]
    Eva = 6,
}

impl BattleStat {
    /// Position of this stat inside a stage table.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Accuracy and evasion use the 3-based stage multiplier table.
    pub fn is_accuracy_stat(self) -> bool {
        matches!(self, BattleStat::Acc | BattleStat::Eva)
    }

    /// Localization key inside the `battleStat` namespace.
    pub fn locale_key(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for BattleStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleStat::Atk => write!(f, "Attack"),
            BattleStat::Def => write!(f, "Defense"),
            BattleStat::SpAtk => write!(f, "Special Attack"),
            BattleStat::SpDef => write!(f, "Special Defense"),
            BattleStat::Spd => write!(f, "Speed"),
            BattleStat::Acc => write!(f, "Accuracy"),
            BattleStat::Eva => write!(f, "Evasion"),
        }
    }
}

/// Indices into the six permanent stats of a party member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumCount)]
pub enum PermanentStat {
    Hp = 0,
    Attack = 1,
    Defense = 2,
    SpAttack = 3,
    SpDefense = 4,
    Speed = 5,
}

impl PermanentStat {
    pub fn index(self) -> usize {
        self as usize
    }
}
