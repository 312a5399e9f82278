//! Projectile integration system.
//!
//! Moves every live projectile toward the top edge and expires those
//! that leave the visible region. Expired projectiles are despawned by
//! the lifecycle system later in the same tick.

use hecs::World;

use gallery_core::components::Projectile;
use gallery_core::events::SimEvent;
use gallery_core::types::Position;

/// Integrate projectile positions and mark off-canvas ones as dead.
pub fn run(world: &mut World, events: &mut Vec<SimEvent>) {
    for (_entity, (projectile, pos)) in world.query_mut::<(&mut Projectile, &mut Position)>() {
        if !projectile.alive {
            continue;
        }

        pos.y -= projectile.speed;

        if pos.y < 0.0 {
            projectile.alive = false;
            events.push(SimEvent::ProjectileExpired { id: projectile.id });
        }
    }
}
