//! Core engine types and utilities for the shelf puzzle.
//!
//! This crate provides the foundational types used across all crates:
//! - Planar pose and velocity of rigid items
//! - Fixed-step clock and tick-driven timers
//! - Item kinds used by the hazard rules

pub mod components;
pub mod time;
pub mod transform;

pub use components::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Vec2, Vec3};
pub use hecs::{Entity, World};
