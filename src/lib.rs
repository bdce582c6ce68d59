//! Stat-stage battle field
//!
//! A phase-driven battle engine that tracks stat stages per combatant on the
//! field, resolves status moves such as Swords Dance, Charm and Haze, and
//! renders its battle log from bundled localization tables.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod errors;
pub mod game_manager;
pub mod i18n;
pub mod move_data;
pub mod player;
pub mod pokemon;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    Ability, BattleStat, BerryType, Move, MoveCategory, MoveData, MoveEffect, MoveTarget,
    PermanentStat, PokemonSpecies, PokemonType, Species, Target,
};

// --- From this crate's modules (`src/`) ---

// Core battle engine and state.
pub use battle::engine::{BattleEngine, PhaseStep};
pub use battle::events::{BattleEvent, EventBus};
pub use battle::field::{BattlerIndex, Combatant, Field, Side};
pub use battle::phases::{Phase, PhaseKind};
pub use battle::stat_stages::StatStageTable;
pub use battle::state::{BattleFormat, BattleState, GameState, TurnRng};

// Drivers and configuration.
pub use config::GameConfig;
pub use game_manager::{BattleOverrides, GameManager};

// Core runtime types for a battle.
pub use player::{BattlePlayer, PlayerAction};
pub use pokemon::PokemonInst;

// Primary data access functions.
pub use move_data::get_move_data;
pub use pokemon::get_species_data;

// Localization.
pub use i18n::{Locale, TextContext, Translator};

// Crate-specific error and result types.
pub use errors::{
    ActionError, BattleEngineError, BattleResult, BattleStateError, ConfigError, LocaleError,
    LocaleResult, MoveDataError, MoveDataResult, PhaseError, SpeciesDataError, SpeciesDataResult,
};
