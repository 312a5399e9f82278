//! Simulation systems, one module per concern.
//!
//! Each system is a `run` function taking the world plus whatever engine
//! state it needs. The engine calls them in a fixed order every tick.

pub mod collision;
pub mod lifecycle;
pub mod movement;
pub mod snapshot;
pub mod spawner;
pub mod sync;
pub mod turret;
