//! Scene snapshot — the complete visible state produced by each tick.

use serde::{Deserialize, Serialize};

use crate::components::Direction;
use crate::events::SimEvent;
use crate::types::SimTime;

/// Engine lifecycle phase. Stopped is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    #[default]
    Idle,
    Running,
    Stopped,
}

/// Complete scene state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    /// Current grid generation (0 before the first grid exists).
    pub generation: u32,
    pub turret: TurretView,
    pub projectiles: Vec<ProjectileView>,
    pub targets: Vec<TargetView>,
    /// Events that fired during this tick.
    pub events: Vec<SimEvent>,
}

/// Turret pose for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurretView {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub direction: Direction,
}

/// A live projectile for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// A live target for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetView {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: u8,
    pub generation: u32,
}
