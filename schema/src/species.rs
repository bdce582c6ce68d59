use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString, IntoStaticStr};

/// Species known to the battle field. The snake_case form is the key in
/// the `pokemon` localization namespace.
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
#[strum(serialize_all = "snake_case")]
pub enum Species {
    Rattata,
    Raticate,
    Pikachu,
    Koffing,
    Weezing,
    Magikarp,
    Snorlax,
    Krabby,
    Tentacool,
    Swablu,
}

impl Species {
    /// Localization key inside the `pokemon` namespace.
    pub fn locale_key(self) -> &'static str {
        self.into()
    }

    /// English display name.
    pub fn name(self) -> &'static str {
        match self {
            Species::Rattata => "Rattata",
            Species::Raticate => "Raticate",
            Species::Pikachu => "Pikachu",
            Species::Koffing => "Koffing",
            Species::Weezing => "Weezing",
            Species::Magikarp => "Magikarp",
            Species::Snorlax => "Snorlax",
            Species::Krabby => "Krabby",
            Species::Tentacool => "Tentacool",
            Species::Swablu => "Swablu",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
