pub mod ai;
pub mod commands;
pub mod engine;
pub mod events;
pub mod field;
pub mod move_effects;
pub mod phases;
pub mod stat_stages;
pub mod state;
pub mod stats;

#[cfg(test)]
pub(crate) mod tests;
