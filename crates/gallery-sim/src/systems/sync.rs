//! Renderer synchronization: pushes the tick's entity diffs out through
//! the Renderer trait.
//!
//! Runs last in the tick, after all state mutation is complete, so the
//! renderer never observes a partially-updated tick. Creations are
//! reported first, then position updates, then removals.

use hecs::{Entity, World};

use gallery_core::components::{Projectile, Target, Turret};
use gallery_core::constants::{PROJECTILE_COLOR, TURRET_COLOR};
use gallery_core::render::{Renderer, SpriteAttrs, SpriteKind};
use gallery_core::types::Position;

/// Drain the tick's creation/removal buffers into renderer calls and
/// report movement for the turret and all pre-existing projectiles.
pub fn run(
    world: &mut World,
    renderer: &mut dyn Renderer,
    created: &mut Vec<Entity>,
    removed: &mut Vec<(SpriteKind, u32)>,
    turret_moved: bool,
) {
    let mut created_ids: Vec<u32> = Vec::with_capacity(created.len());

    for entity in created.drain(..) {
        if let Some((kind, id, attrs)) = describe(world, entity) {
            renderer.entity_created(kind, id, attrs);
            created_ids.push(id);
        }
    }

    if turret_moved {
        for (_entity, (turret, pos)) in world.query_mut::<(&Turret, &Position)>() {
            renderer.entity_updated(
                SpriteKind::Turret,
                turret.id,
                SpriteAttrs {
                    x: pos.x,
                    y: pos.y,
                    size: turret.width,
                    color: TURRET_COLOR,
                },
            );
        }
    }

    for (_entity, (projectile, pos)) in world.query_mut::<(&Projectile, &Position)>() {
        if projectile.alive && !created_ids.contains(&projectile.id) {
            renderer.entity_updated(
                SpriteKind::Projectile,
                projectile.id,
                SpriteAttrs {
                    x: pos.x,
                    y: pos.y,
                    size: projectile.radius,
                    color: PROJECTILE_COLOR,
                },
            );
        }
    }

    for (kind, id) in removed.drain(..) {
        renderer.entity_removed(kind, id);
    }
}

/// Kind, id, and attributes of a freshly created entity.
fn describe(world: &World, entity: Entity) -> Option<(SpriteKind, u32, SpriteAttrs)> {
    let pos = *world.get::<&Position>(entity).ok()?;

    if let Ok(turret) = world.get::<&Turret>(entity) {
        return Some((
            SpriteKind::Turret,
            turret.id,
            SpriteAttrs {
                x: pos.x,
                y: pos.y,
                size: turret.width,
                color: TURRET_COLOR,
            },
        ));
    }

    if let Ok(projectile) = world.get::<&Projectile>(entity) {
        return Some((
            SpriteKind::Projectile,
            projectile.id,
            SpriteAttrs {
                x: pos.x,
                y: pos.y,
                size: projectile.radius,
                color: PROJECTILE_COLOR,
            },
        ));
    }

    if let Ok(target) = world.get::<&Target>(entity) {
        return Some((
            SpriteKind::Target,
            target.id,
            SpriteAttrs {
                x: pos.x,
                y: pos.y,
                size: target.size,
                color: target.color,
            },
        ));
    }

    None
}
