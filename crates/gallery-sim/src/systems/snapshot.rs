//! Snapshot system: queries the ECS world and builds a SceneSnapshot.
//!
//! This system is read-only — it never modifies the world.

use hecs::World;

use gallery_core::components::{Projectile, Target, Turret};
use gallery_core::events::SimEvent;
use gallery_core::state::{ProjectileView, SceneSnapshot, SimPhase, TargetView, TurretView};
use gallery_core::types::{Position, SimTime};

/// Build a complete SceneSnapshot from the current world state.
pub fn build(
    world: &World,
    time: &SimTime,
    phase: SimPhase,
    generation: u32,
    events: Vec<SimEvent>,
) -> SceneSnapshot {
    let turret = world
        .query::<(&Turret, &Position)>()
        .iter()
        .next()
        .map(|(_, (turret, pos))| TurretView {
            id: turret.id,
            x: pos.x,
            y: pos.y,
            width: turret.width,
            direction: turret.direction,
        })
        .unwrap_or_default();

    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .filter(|(_, (projectile, _))| projectile.alive)
        .map(|(_, (projectile, pos))| ProjectileView {
            id: projectile.id,
            x: pos.x,
            y: pos.y,
            radius: projectile.radius,
        })
        .collect();
    projectiles.sort_by_key(|p| p.id);

    let mut targets: Vec<TargetView> = world
        .query::<(&Target, &Position)>()
        .iter()
        .filter(|(_, (target, _))| target.alive)
        .map(|(_, (target, pos))| TargetView {
            id: target.id,
            x: pos.x,
            y: pos.y,
            size: target.size,
            color: target.color,
            generation: target.generation,
        })
        .collect();
    targets.sort_by_key(|t| t.id);

    SceneSnapshot {
        time: *time,
        phase,
        generation,
        turret,
        projectiles,
        targets,
        events,
    }
}
