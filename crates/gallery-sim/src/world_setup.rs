//! Entity spawn factories for the gallery world.
//!
//! Creates the turret, grid generations, and projectiles with their
//! component bundles. Sprite ids come from a single monotone counter so
//! they are unique across kinds and generations.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use gallery_core::components::{Direction, Projectile, Target, Turret};
use gallery_core::config::GalleryConfig;
use gallery_core::constants::{TARGET_BAND_HEIGHT, TARGET_PALETTE_SIZE};
use gallery_core::types::Position;

/// Spawn the turret, centered in its travel range.
pub fn spawn_turret(
    world: &mut World,
    next_sprite_id: &mut u32,
    config: &GalleryConfig,
) -> hecs::Entity {
    let id = alloc_id(next_sprite_id);
    let x = (config.turret_bounds_min + config.turret_max_x()) / 2.0;

    world.spawn((
        Turret {
            id,
            width: config.turret_width,
            speed: config.turret_speed,
            bounds_min: config.turret_bounds_min,
            bounds_max: config.turret_bounds_max,
            direction: Direction::Right,
        },
        Position::new(x, config.turret_top_y()),
    ))
}

/// Spawn a complete grid generation: rows x cols targets at uniform
/// spacing, colors rolled per cell. Appends the new entities to
/// `created` for renderer notification.
pub fn spawn_grid(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_sprite_id: &mut u32,
    config: &GalleryConfig,
    generation: u32,
    created: &mut Vec<hecs::Entity>,
) {
    let pitch = config.cell_size + config.cell_gap;
    for row in 0..config.grid_rows {
        for col in 0..config.grid_cols {
            let position = Position::new(
                config.grid_origin_x + col as f64 * pitch,
                config.grid_origin_y + row as f64 * pitch,
            );
            let entity = spawn_target(world, rng, next_sprite_id, config, position, generation);
            created.push(entity);
        }
    }
}

/// Spawn a single target at the given position with a freshly rolled
/// color.
pub fn spawn_target(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_sprite_id: &mut u32,
    config: &GalleryConfig,
    position: Position,
    generation: u32,
) -> hecs::Entity {
    let id = alloc_id(next_sprite_id);
    let color = rng.gen_range(0..TARGET_PALETTE_SIZE);

    world.spawn((
        Target {
            id,
            size: config.cell_size,
            color,
            generation,
            alive: true,
        },
        position,
    ))
}

/// Spawn a target at a random position inside the target band
/// (continuous policy).
pub fn spawn_random_target(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_sprite_id: &mut u32,
    config: &GalleryConfig,
) -> hecs::Entity {
    let x = rng.gen_range(0.0..config.canvas_width - config.cell_size);
    let y = config.grid_origin_y + rng.gen_range(0.0..TARGET_BAND_HEIGHT);
    spawn_target(world, rng, next_sprite_id, config, Position::new(x, y), 0)
}

/// Spawn a projectile at the muzzle position.
pub fn spawn_projectile(
    world: &mut World,
    next_sprite_id: &mut u32,
    config: &GalleryConfig,
    muzzle: Position,
    tick: u64,
) -> hecs::Entity {
    let id = alloc_id(next_sprite_id);

    world.spawn((
        Projectile {
            id,
            radius: config.projectile_radius,
            speed: config.projectile_speed,
            spawn_tick: tick,
            alive: true,
        },
        muzzle,
    ))
}

fn alloc_id(next: &mut u32) -> u32 {
    let id = *next;
    *next += 1;
    id
}
