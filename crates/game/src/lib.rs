//! Shelf puzzle gameplay: drag and throw, proximity hazards, explosions and level completion.

pub mod config;
pub mod dialogue;
pub mod drag;
pub mod explosion;
pub mod hazard;
pub mod item;
pub mod level;
pub mod presentation;
pub mod script;
pub mod stability;
pub mod state;
pub mod sticky;
pub mod update;

#[cfg(test)]
mod testing;

pub use state::{GamePhase, Simulation};
