//! Events emitted by the simulation, carried in each tick's snapshot.

use serde::{Deserialize, Serialize};

/// Lifecycle events observable from outside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A projectile destroyed a target this tick.
    TargetDestroyed { id: u32 },
    /// A projectile left the visible region (y < 0) this tick.
    ProjectileExpired { id: u32 },
    /// The grid was empty and a full new generation was created.
    GridRegenerated { generation: u32 },
}
