//! Turret movement system — the two interchangeable motion policies.
//!
//! Direction only changes at discrete policy events: hitting a bound
//! (reflecting walk) or a re-roll boundary tick (timed random walk).

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use gallery_core::components::{Direction, Turret};
use gallery_core::config::{GalleryConfig, MovementPolicy};
use gallery_core::types::Position;

/// Advance the turret by one step under the configured policy.
/// Returns whether the position changed, so the renderer is only
/// notified on movement.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng, config: &GalleryConfig, tick: u64) -> bool {
    let mut moved = false;

    for (_entity, (turret, pos)) in world.query_mut::<(&mut Turret, &mut Position)>() {
        let previous = pos.x;
        let max_x = turret.max_x();

        match config.movement {
            MovementPolicy::ReflectingWalk => {
                let next = pos.x + turret.direction.sign() * turret.speed;
                if next < turret.bounds_min {
                    pos.x = turret.bounds_min;
                    turret.direction = Direction::Right;
                } else if next > max_x {
                    pos.x = max_x;
                    turret.direction = Direction::Left;
                } else {
                    pos.x = next;
                }
            }
            MovementPolicy::TimedRandomWalk => {
                if tick % config.direction_interval_ticks() == 0 {
                    turret.direction = if rng.gen_bool(0.5) {
                        Direction::Right
                    } else {
                        Direction::Left
                    };
                }
                pos.x = (pos.x + turret.direction.sign() * turret.speed)
                    .clamp(turret.bounds_min, max_x);
            }
        }

        moved = pos.x != previous;
    }

    moved
}
