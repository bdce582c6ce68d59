use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString, IntoStaticStr};

/// Every move the battle field knows about.
///
/// Only status moves that touch stat stages are modeled. The camelCase
/// `IntoStaticStr` form is the key of the move in the `move` localization
/// namespace (`Move::SwordsDance` -> `"swordsDance"`).
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
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum Move {
    // Normal Type
    SwordsDance,
    Growl,
    TailWhip,
    Leer,
    Harden,
    Screech,
    DoubleTeam,
    Minimize,
    ScaryFace,
    Splash,

    // Fairy Type
    Charm,

    // Ground Type
    SandAttack,

    // Ice Type
    Haze,

    // Psychic Type
    Agility,
    Amnesia,
    CalmMind,

    // Dark Type
    NastyPlot,
    FakeTears,
    HoneClaws,

    // Fighting Type
    BulkUp,

    // Dragon Type
    DragonDance,
}

impl Move {
    /// Localization key inside the `move` namespace.
    pub fn locale_key(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // CamelCase variant -> "Title Case"
        let debug_string = format!("{:?}", self);
        let spaced: String = debug_string
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if i > 0 && c.is_uppercase() {
                    format!(" {}", c)
                } else {
                    c.to_string()
                }
            })
            .collect();
        write!(f, "{}", spaced)
    }
}
