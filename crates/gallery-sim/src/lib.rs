//! Deterministic simulation engine for the shooting gallery.
//!
//! `SimulationEngine` owns the hecs ECS world and advances it one tick at
//! a time; systems are plain functions over the world, run in a fixed
//! order. Completely headless — rendering happens behind the
//! `gallery_core::render::Renderer` trait.

pub mod engine;
pub mod systems;
pub mod world_setup;

#[cfg(test)]
mod tests;
