//! Collision system — point-vs-rectangle tests between projectiles and
//! targets.
//!
//! Hits are collected first and applied afterwards, so every pair sees
//! target liveness from the start of the scan and each entity resolves
//! at most once per tick.

use hecs::{Entity, World};

use gallery_core::components::{Projectile, Target};
use gallery_core::events::SimEvent;
use gallery_core::types::Position;

/// True when the point lies strictly inside the rectangle.
/// Contact exactly on an edge or corner is a miss.
pub fn hit_test(px: f64, py: f64, rx: f64, ry: f64, size: f64) -> bool {
    rx < px && px < rx + size && ry < py && py < ry + size
}

/// Scan live projectiles against live targets and apply the hits.
pub fn run(world: &mut World, events: &mut Vec<SimEvent>) {
    // Candidates in ascending id order, so the first-created target is
    // the one credited if rectangles ever overlap.
    let mut targets: Vec<(Entity, u32, f64, f64, f64)> = world
        .query_mut::<(&Target, &Position)>()
        .into_iter()
        .filter(|(_, (target, _))| target.alive)
        .map(|(entity, (target, pos))| (entity, target.id, pos.x, pos.y, target.size))
        .collect();
    targets.sort_by_key(|&(_, id, ..)| id);

    let mut projectiles: Vec<(Entity, f64, f64, u32)> = world
        .query_mut::<(&Projectile, &Position)>()
        .into_iter()
        .filter(|(_, (projectile, _))| projectile.alive)
        .map(|(entity, (projectile, pos))| (entity, pos.x, pos.y, projectile.id))
        .collect();
    projectiles.sort_by_key(|&(.., id)| id);

    let mut hits: Vec<(Entity, Entity, u32)> = Vec::new();
    let mut consumed = vec![false; targets.len()];

    for &(proj_entity, px, py, _) in &projectiles {
        for (idx, &(tgt_entity, tgt_id, tx, ty, size)) in targets.iter().enumerate() {
            if consumed[idx] {
                continue;
            }
            if hit_test(px, py, tx, ty, size) {
                consumed[idx] = true;
                hits.push((proj_entity, tgt_entity, tgt_id));
                break;
            }
        }
    }

    // Apply atomically: both entities die in the same tick.
    for (proj_entity, tgt_entity, tgt_id) in hits {
        if let Ok(mut projectile) = world.get::<&mut Projectile>(proj_entity) {
            projectile.alive = false;
        }
        if let Ok(mut target) = world.get::<&mut Target>(tgt_entity) {
            target.alive = false;
        }
        events.push(SimEvent::TargetDestroyed { id: tgt_id });
    }
}
