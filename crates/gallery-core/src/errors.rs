//! Error taxonomy. Configuration problems are caught at engine
//! construction; invariant violations signal a defect, not a
//! recoverable condition.

use thiserror::Error;

/// Rejected configuration, detected before the simulation starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("grid needs at least one column and row, got {cols}x{rows}")]
    EmptyGrid { cols: u32, rows: u32 },

    #[error("{field} of {ms} ms is shorter than one tick")]
    IntervalTooShort { field: &'static str, ms: u64 },

    #[error("turret width {width} does not fit travel bounds [{min}, {max}]")]
    TurretTooWide { width: f64, min: f64, max: f64 },

    #[error("spawn jitter must be finite and non-negative, got {value}")]
    InvalidJitter { value: f64 },
}

/// Broken structural invariant observed after a tick. Indicates a bug in
/// the simulation itself; the engine checks these in debug builds.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("turret at x={x} outside travel range [{min}, {max}]")]
    TurretOutOfBounds { x: f64, min: f64, max: f64 },

    #[error("projectile {id} still live above the top edge (y={y})")]
    StrayProjectile { id: u32, y: f64 },

    #[error("{live} live targets exceed grid capacity {capacity}")]
    TargetOverflow { live: u32, capacity: u32 },
}
