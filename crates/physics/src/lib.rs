//! Physics host for the shelf puzzle, built on Rapier3D.

pub mod collision;
pub mod hooks;
pub mod host;
pub mod physics_world;
pub mod query;

pub use collision::*;
pub use hooks::*;
pub use host::*;
pub use physics_world::*;

// Re-export Rapier for downstream crates
pub use rapier3d;

// Re-export common Rapier types
pub use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};
