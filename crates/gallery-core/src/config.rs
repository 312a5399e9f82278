//! Simulation configuration.
//!
//! All intervals are configured in milliseconds and converted to whole
//! ticks; all lengths and speeds are pixels and pixels per tick. The
//! defaults reproduce the stock gallery animation.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::errors::ConfigError;

/// Turret motion policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementPolicy {
    /// March back and forth, reversing at the travel bounds.
    ReflectingWalk,
    /// Re-roll the direction at a fixed interval; clamp at the bounds.
    #[default]
    TimedRandomWalk,
}

/// Target arrangement policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetPolicy {
    /// Fixed rows x cols grid, regenerated as a whole once cleared.
    #[default]
    FixedGrid,
    /// New targets rain in at random positions on a fixed interval.
    Continuous,
}

/// Configuration for a gallery simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// RNG seed for determinism. Same seed = same animation.
    pub seed: u64,

    /// Canvas width in pixels.
    pub canvas_width: f64,
    /// Canvas height in pixels.
    pub canvas_height: f64,

    /// Grid columns (fixed-grid policy).
    pub grid_cols: u32,
    /// Grid rows (fixed-grid policy).
    pub grid_rows: u32,
    /// Target cell edge length in pixels.
    pub cell_size: f64,
    /// Gap between adjacent grid cells in pixels.
    pub cell_gap: f64,
    /// Top-left corner of the first grid cell.
    pub grid_origin_x: f64,
    pub grid_origin_y: f64,

    /// Turret base width in pixels.
    pub turret_width: f64,
    /// Turret base height in pixels.
    pub turret_height: f64,
    /// Turret travel speed in pixels per tick.
    pub turret_speed: f64,
    /// Travel bounds for the turret's base.
    pub turret_bounds_min: f64,
    pub turret_bounds_max: f64,

    /// Projectile visual radius in pixels.
    pub projectile_radius: f64,
    /// Projectile climb speed in pixels per tick.
    pub projectile_speed: f64,

    /// Interval between shots, milliseconds.
    pub fire_interval_ms: u64,
    /// Interval between target spawns (continuous policy), milliseconds.
    pub target_spawn_interval_ms: u64,
    /// Interval between direction re-rolls (timed-random-walk policy),
    /// milliseconds.
    pub direction_interval_ms: u64,

    /// Bounded horizontal jitter applied to the muzzle position, pixels.
    /// Zero disables jitter.
    pub spawn_jitter: f64,

    /// Turret motion policy.
    pub movement: MovementPolicy,
    /// Target arrangement policy.
    pub targets: TargetPolicy,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            grid_cols: GRID_COLS,
            grid_rows: GRID_ROWS,
            cell_size: CELL_SIZE,
            cell_gap: CELL_GAP,
            grid_origin_x: GRID_ORIGIN_X,
            grid_origin_y: GRID_ORIGIN_Y,
            turret_width: TURRET_WIDTH,
            turret_height: TURRET_HEIGHT,
            turret_speed: TURRET_SPEED,
            turret_bounds_min: 0.0,
            turret_bounds_max: CANVAS_WIDTH,
            projectile_radius: PROJECTILE_RADIUS,
            projectile_speed: PROJECTILE_SPEED,
            fire_interval_ms: FIRE_INTERVAL_MS,
            target_spawn_interval_ms: TARGET_SPAWN_INTERVAL_MS,
            direction_interval_ms: DIRECTION_INTERVAL_MS,
            spawn_jitter: 0.0,
            movement: MovementPolicy::default(),
            targets: TargetPolicy::default(),
        }
    }
}

impl GalleryConfig {
    /// Validate every field the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("cell_size", self.cell_size),
            ("cell_gap", self.cell_gap),
            ("turret_width", self.turret_width),
            ("turret_height", self.turret_height),
            ("turret_speed", self.turret_speed),
            ("projectile_radius", self.projectile_radius),
            ("projectile_speed", self.projectile_speed),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.targets == TargetPolicy::FixedGrid
            && (self.grid_cols == 0 || self.grid_rows == 0)
        {
            return Err(ConfigError::EmptyGrid {
                cols: self.grid_cols,
                rows: self.grid_rows,
            });
        }

        let intervals = [
            ("fire_interval_ms", self.fire_interval_ms),
            ("target_spawn_interval_ms", self.target_spawn_interval_ms),
            ("direction_interval_ms", self.direction_interval_ms),
        ];
        for (field, ms) in intervals {
            if ms_to_ticks(ms) == 0 {
                return Err(ConfigError::IntervalTooShort { field, ms });
            }
        }

        if self.turret_bounds_max - self.turret_width < self.turret_bounds_min {
            return Err(ConfigError::TurretTooWide {
                width: self.turret_width,
                min: self.turret_bounds_min,
                max: self.turret_bounds_max,
            });
        }

        if !self.spawn_jitter.is_finite() || self.spawn_jitter < 0.0 {
            return Err(ConfigError::InvalidJitter {
                value: self.spawn_jitter,
            });
        }

        Ok(())
    }

    /// Ticks between shots.
    pub fn fire_interval_ticks(&self) -> u64 {
        ms_to_ticks(self.fire_interval_ms)
    }

    /// Ticks between target spawns in the continuous policy.
    pub fn target_interval_ticks(&self) -> u64 {
        ms_to_ticks(self.target_spawn_interval_ms)
    }

    /// Ticks between direction re-rolls in the timed-random-walk policy.
    pub fn direction_interval_ticks(&self) -> u64 {
        ms_to_ticks(self.direction_interval_ms)
    }

    /// Largest x the turret's left edge may occupy.
    pub fn turret_max_x(&self) -> f64 {
        self.turret_bounds_max - self.turret_width
    }

    /// Top edge y of the turret base; projectiles leave from here.
    pub fn turret_top_y(&self) -> f64 {
        self.canvas_height - self.turret_height - TURRET_BOTTOM_MARGIN
    }

    /// Total cell count of one grid generation.
    pub fn grid_capacity(&self) -> u32 {
        self.grid_cols * self.grid_rows
    }
}

/// Convert a millisecond period to whole ticks (truncating).
fn ms_to_ticks(ms: u64) -> u64 {
    ms * TICK_RATE as u64 / 1000
}
