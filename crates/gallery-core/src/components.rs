//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Systems own the logic, components own the state.

use serde::{Deserialize, Serialize};

/// Horizontal travel direction of the turret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    /// Signed unit step for position integration.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// The autonomous firing turret. Its Position holds the left edge x and
/// the top edge y; only x ever changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turret {
    /// Unique sprite id.
    pub id: u32,
    /// Base width in pixels.
    pub width: f64,
    /// Travel speed in pixels per tick.
    pub speed: f64,
    /// Leftmost allowed x for the turret's left edge.
    pub bounds_min: f64,
    /// Rightmost allowed x for the turret's right edge.
    pub bounds_max: f64,
    /// Current travel direction.
    pub direction: Direction,
}

impl Turret {
    /// Largest x the left edge may reach without exiting the bounds.
    pub fn max_x(&self) -> f64 {
        self.bounds_max - self.width
    }
}

/// A projectile in flight. Collisions treat it as the point at its
/// Position; the radius is only reported to the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Unique sprite id.
    pub id: u32,
    /// Visual radius in pixels.
    pub radius: f64,
    /// Climb speed in pixels per tick (subtracted from y).
    pub speed: f64,
    /// Tick at which this projectile left the muzzle.
    pub spawn_tick: u64,
    /// Cleared exactly once, on collision or on leaving the canvas.
    pub alive: bool,
}

/// A destructible target cell occupying the half-open square
/// `[x, x + size) x [y, y + size)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    /// Unique sprite id.
    pub id: u32,
    /// Edge length in pixels.
    pub size: f64,
    /// Palette slot, rolled at spawn.
    pub color: u8,
    /// Grid generation this target belongs to (0 outside the grid policy).
    pub generation: u32,
    /// Cleared on collision; a dead target is never revived.
    pub alive: bool,
}
