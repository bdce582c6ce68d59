use crate::battle::field::BattlerIndex;
use crate::battle::phases::PhaseKind;
use crate::i18n::{Locale, Namespace};
use schema::{Move, Species};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the battle field engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleEngineError {
    /// Error related to move data lookup or processing
    #[error("Move data error: {0}")]
    MoveData(#[from] MoveDataError),
    /// Error related to species data lookup or processing
    #[error("Species data error: {0}")]
    SpeciesData(#[from] SpeciesDataError),
    /// Error related to invalid battle state
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
    /// Error related to invalid player actions
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
    /// Error raised while stepping the phase queue
    #[error("Phase error: {0}")]
    Phase(#[from] PhaseError),
    /// Error related to localized text
    #[error("Localization error: {0}")]
    Locale(#[from] LocaleError),
}

/// Errors related to move data operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveDataError {
    /// The specified move was not found in the database
    #[error("Move not found: {0:?}")]
    MoveNotFound(Move),
    /// Move data is malformed or incomplete
    #[error("Malformed move data: {0}")]
    MalformedData(String),
}

/// Errors related to species data operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeciesDataError {
    /// The specified species was not found in the database
    #[error("Species not found: {0:?}")]
    SpeciesNotFound(Species),
    /// Species data is malformed or incomplete
    #[error("Malformed species data: {0}")]
    MalformedData(String),
}

/// Errors related to battle state validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleStateError {
    /// No combatant occupies the given battler slot
    #[error("No active Pokemon at {0:?}")]
    NoActivePokemon(BattlerIndex),
    /// A party was empty when the battle started
    #[error("Party for {0} is empty")]
    EmptyParty(String),
    /// The battle has already ended
    #[error("The battle is over")]
    BattleOver,
    /// Battle state is in an inconsistent or corrupted state
    #[error("Inconsistent battle state: {0}")]
    InconsistentState(String),
}

/// Errors related to player actions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Move index is out of bounds
    #[error("Invalid move index: {0}")]
    InvalidMoveIndex(usize),
    /// The move in this slot has no PP left
    #[error("Move {0:?} has no PP remaining")]
    NoPpRemaining(Move),
    /// Pokemon index is out of bounds
    #[error("Invalid Pokemon index: {0}")]
    InvalidPokemonIndex(usize),
    /// No battler on the player's side is waiting for a command
    #[error("No battler is awaiting a command")]
    NoBattlerAwaitingCommand,
    /// Action is not valid in the current battle state
    #[error("Invalid action: {0}")]
    InvalidAction(String),
}

/// Errors raised by the phase interceptor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhaseError {
    /// The queue stopped on a command phase that needs player input
    #[error("Cannot reach {target}: {awaiting:?} is awaiting a command")]
    AwaitingInput {
        target: PhaseKind,
        awaiting: BattlerIndex,
    },
    /// The queue ran dry before a phase of the requested kind ran
    #[error("Phase queue exhausted before reaching {0}")]
    QueueExhausted(PhaseKind),
    /// No battle has been started yet
    #[error("No battle in progress")]
    NoBattle,
}

/// Errors related to localization tables
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    /// The locale code is not one we ship tables for
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),
    /// A namespace file failed to parse
    #[error("Malformed {namespace} table for {locale}: {message}")]
    MalformedTable {
        locale: Locale,
        namespace: Namespace,
        message: String,
    },
    /// A key is not written as `namespace:path`
    #[error("Malformed key: {0}")]
    MalformedKey(String),
    /// The namespace part of a key is unknown
    #[error("Unknown namespace: {0}")]
    UnknownNamespace(String),
    /// The key is absent from the locale's table
    #[error("Missing key {key} in locale {locale}")]
    MissingKey { locale: Locale, key: String },
    /// A template references a placeholder the context does not provide
    #[error("Missing value for placeholder {{{{{0}}}}}")]
    MissingPlaceholder(String),
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Invalid config: {0}")]
    Invalid(String),
    #[error(transparent)]
    Locale(#[from] LocaleError),
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using MoveDataError
pub type MoveDataResult<T> = Result<T, MoveDataError>;

/// Type alias for Results using SpeciesDataError
pub type SpeciesDataResult<T> = Result<T, SpeciesDataError>;

/// Type alias for Results using LocaleError
pub type LocaleResult<T> = Result<T, LocaleError>;
