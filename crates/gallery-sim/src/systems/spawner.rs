//! Spawn scheduling system.
//!
//! Fires a projectile from the muzzle on every fire-interval boundary
//! tick, and — under the continuous target policy — rains a new target
//! on every target-interval boundary. Boundary ticks include tick 0.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use gallery_core::components::Turret;
use gallery_core::config::{GalleryConfig, TargetPolicy};
use gallery_core::types::Position;

use crate::world_setup;

/// Spawn whatever the tick's schedule calls for.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_sprite_id: &mut u32,
    config: &GalleryConfig,
    tick: u64,
    created: &mut Vec<Entity>,
) {
    if tick % config.fire_interval_ticks() == 0 {
        if let Some(muzzle) = muzzle_position(world, rng, config) {
            let entity = world_setup::spawn_projectile(world, next_sprite_id, config, muzzle, tick);
            created.push(entity);
        }
    }

    if config.targets == TargetPolicy::Continuous
        && tick % config.target_interval_ticks() == 0
    {
        let entity = world_setup::spawn_random_target(world, rng, next_sprite_id, config);
        created.push(entity);
    }
}

/// Muzzle position: turret center x (plus bounded jitter), turret top y.
fn muzzle_position(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &GalleryConfig,
) -> Option<Position> {
    let (mut x, y) = world
        .query_mut::<(&Turret, &Position)>()
        .into_iter()
        .next()
        .map(|(_, (turret, pos))| (pos.x + turret.width / 2.0, pos.y))?;

    if config.spawn_jitter > 0.0 {
        x += rng.gen_range(-config.spawn_jitter..=config.spawn_jitter);
        x = x.clamp(0.0, config.canvas_width);
    }

    Some(Position::new(x, y))
}
