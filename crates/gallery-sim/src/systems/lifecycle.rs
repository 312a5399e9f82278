//! Lifecycle system: prunes dead entities and regenerates an empty grid.
//!
//! Regeneration is all-or-nothing — it triggers only when the live
//! target count reaches zero, and then recreates the full grid in one
//! pass. Uses a pre-allocated buffer to avoid per-tick allocation.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use gallery_core::components::{Projectile, Target};
use gallery_core::config::{GalleryConfig, TargetPolicy};
use gallery_core::events::SimEvent;
use gallery_core::render::SpriteKind;

use crate::world_setup;

/// Remove every dead projectile and target, then regenerate the grid if
/// it has been fully cleared.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_sprite_id: &mut u32,
    config: &GalleryConfig,
    generation: &mut u32,
    events: &mut Vec<SimEvent>,
    created: &mut Vec<Entity>,
    removed: &mut Vec<(SpriteKind, u32)>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if !projectile.alive {
            removed.push((SpriteKind::Projectile, projectile.id));
            despawn_buffer.push(entity);
        }
    }

    for (entity, target) in world.query_mut::<&Target>() {
        if !target.alive {
            removed.push((SpriteKind::Target, target.id));
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    if config.targets == TargetPolicy::FixedGrid {
        let live = world.query_mut::<&Target>().into_iter().count();
        if live == 0 {
            *generation += 1;
            world_setup::spawn_grid(world, rng, next_sprite_id, config, *generation, created);
            events.push(SimEvent::GridRegenerated {
                generation: *generation,
            });
        }
    }
}
