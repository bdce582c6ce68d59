//! Localized text: bundled per-locale tables, `namespace:path` lookup and
//! `{{placeholder}}` interpolation.

pub mod interpolate;
pub mod locale;
pub mod store;
pub mod tables;

pub use interpolate::{interpolate, placeholders, TextContext};
pub use locale::{Locale, Namespace};
pub use store::{tables_for, Translator};
pub use tables::{AbilityText, BerryText, ItemText, LocaleTables, MoveText, TextLookup};
