// Battle Field Schema - Shared type definitions
// This crate contains the static enums and data records shared between the
// battle engine, its embedded data tables and the localization store.

// Re-export the main types
pub use abilities::*;
pub use items::*;
pub use move_types::*;
pub use moves::*;
pub use pokemon_types::*;
pub use species::*;
pub use species_data::*;
pub use stats::*;

pub mod abilities;
pub mod items;
pub mod move_types;
pub mod moves;
pub mod pokemon_types;
pub mod species;
pub mod species_data;
pub mod stats;
