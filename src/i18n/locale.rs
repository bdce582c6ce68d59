use crate::errors::LocaleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{EnumIter, IntoStaticStr};

/// Languages with bundled text tables.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    IntoStaticStr,
)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    #[strum(serialize = "en")]
    En,
    #[serde(rename = "fr")]
    #[strum(serialize = "fr")]
    Fr,
    #[serde(rename = "pt_BR")]
    #[strum(serialize = "pt_BR")]
    PtBr,
}

impl Locale {
    /// Directory name of the locale's tables, e.g. `pt_BR`.
    pub fn code(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    /// Accepts the canonical code as well as `pt-BR` and case variations.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('-', "_").to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "fr" => Ok(Locale::Fr),
            "pt_br" => Ok(Locale::PtBr),
            _ => Err(LocaleError::UnknownLocale(s.to_string())),
        }
    }
}

/// A group of related keys, the part before `:` in a lookup key.
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
    IntoStaticStr,
    strum::EnumString,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum Namespace {
    Ability,
    Move,
    Berry,
    ModifierType,
    Weather,
    Tutorial,
    Battle,
    BattleStat,
    Pokemon,
}

impl Namespace {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
