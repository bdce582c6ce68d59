use crate::errors::ConfigError;
use crate::game_manager::BattleOverrides;
use crate::i18n::Locale;
use schema::Move;
use serde::{Deserialize, Serialize};
use std::path::Path;

const MAX_MOVES: usize = 4;

/// Settings for a run of the battle field, read from a RON file.
///
/// ```ron
/// (
///     locale: fr,
///     seed: Some(42),
///     overrides: (
///         battle_format: Single,
///         enemy_species: Some(Rattata),
///         enemy_moveset: Some([Splash]),
///     ),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub locale: Locale,
    pub seed: Option<u64>,
    pub overrides: BattleOverrides,
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&source)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let overrides = &self.overrides;
        for (field, level) in [
            ("starting_level", overrides.starting_level),
            ("enemy_level", overrides.enemy_level),
        ] {
            if let Some(level) = level {
                if !(1..=100).contains(&level) {
                    return Err(ConfigError::Invalid(format!(
                        "{} must be between 1 and 100, got {}",
                        field, level
                    )));
                }
            }
        }
        for (field, moves) in [
            ("moveset", &overrides.moveset),
            ("enemy_moveset", &overrides.enemy_moveset),
        ] {
            if let Some(moves) = moves {
                check_moveset(field, moves)?;
            }
        }
        Ok(())
    }
}

fn check_moveset(field: &str, moves: &[Move]) -> Result<(), ConfigError> {
    if moves.is_empty() || moves.len() > MAX_MOVES {
        return Err(ConfigError::Invalid(format!(
            "{} needs 1 to {} moves, got {}",
            field,
            MAX_MOVES,
            moves.len()
        )));
    }
    Ok(())
}
