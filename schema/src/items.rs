use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

/// Berries, keyed in the `berry` localization namespace by their
/// upper-case name (`BerryType::Sitrus` -> `"SITRUS"`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BerryType {
    Sitrus,
    Lum,
    Enigma,
    Liechi,
    Ganlon,
    Petaya,
    Apicot,
    Salac,
    Lansat,
    Starf,
    Leppa,
}

impl BerryType {
    /// Localization key inside the `berry` namespace.
    pub fn locale_key(self) -> &'static str {
        self.into()
    }
}
