use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

/// Abilities a combatant may carry.
///
/// `None` is a real ability slot value (the override used by tests), not an
/// absent one. Only the stat-stage abilities have battle behavior here; the
/// rest exist for their localization entries.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum Ability {
    #[default]
    None,
    Stench,
    RunAway,
    Guts,
    ClearBody,
    HyperCutter,
    KeenEye,
    Simple,
    Contrary,
}

impl Ability {
    /// Localization key inside the `ability` namespace.
    pub fn locale_key(self) -> &'static str {
        self.into()
    }
}
