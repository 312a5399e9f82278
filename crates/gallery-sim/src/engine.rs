//! Simulation engine — the core of the gallery.
//!
//! `SimulationEngine` owns the hecs ECS world, runs all systems in a
//! fixed order each tick, and notifies the renderer once the tick's
//! mutations are complete. Completely headless, enabling deterministic
//! testing.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use gallery_core::components::{Projectile, Target, Turret};
use gallery_core::config::{GalleryConfig, TargetPolicy};
use gallery_core::errors::{ConfigError, InvariantViolation};
use gallery_core::events::SimEvent;
use gallery_core::render::{Renderer, SpriteKind};
use gallery_core::state::{SceneSnapshot, SimPhase};
use gallery_core::types::{Position, SimTime};

use crate::systems;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: GalleryConfig,
    time: SimTime,
    phase: SimPhase,
    rng: ChaCha8Rng,
    next_sprite_id: u32,
    generation: u32,
    events: Vec<SimEvent>,
    created_buffer: Vec<hecs::Entity>,
    removed_buffer: Vec<(SpriteKind, u32)>,
    despawn_buffer: Vec<hecs::Entity>,
    turret_moved: bool,
}

impl SimulationEngine {
    /// Validate the configuration and build an idle engine.
    pub fn new(config: GalleryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);

        Ok(Self {
            world: World::new(),
            config,
            time: SimTime::default(),
            phase: SimPhase::Idle,
            rng,
            next_sprite_id: 0,
            generation: 0,
            events: Vec::new(),
            created_buffer: Vec::new(),
            removed_buffer: Vec::new(),
            despawn_buffer: Vec::new(),
            turret_moved: false,
        })
    }

    /// Transition Idle -> Running: create the turret and, in fixed-grid
    /// mode, the first target generation, then notify the renderer of
    /// the creations.
    pub fn start(&mut self, renderer: &mut dyn Renderer) {
        if self.phase != SimPhase::Idle {
            return;
        }

        let turret = world_setup::spawn_turret(&mut self.world, &mut self.next_sprite_id, &self.config);
        self.created_buffer.push(turret);

        if self.config.targets == TargetPolicy::FixedGrid {
            self.generation = 1;
            world_setup::spawn_grid(
                &mut self.world,
                &mut self.rng,
                &mut self.next_sprite_id,
                &self.config,
                self.generation,
                &mut self.created_buffer,
            );
        }

        self.phase = SimPhase::Running;
        systems::sync::run(
            &mut self.world,
            renderer,
            &mut self.created_buffer,
            &mut self.removed_buffer,
            false,
        );
    }

    /// Advance the simulation by one tick and return the resulting
    /// snapshot. While Idle or Stopped the world is left untouched.
    pub fn tick(&mut self, renderer: &mut dyn Renderer) -> SceneSnapshot {
        if self.phase == SimPhase::Running {
            self.run_systems();
            systems::sync::run(
                &mut self.world,
                renderer,
                &mut self.created_buffer,
                &mut self.removed_buffer,
                self.turret_moved,
            );
            self.time.advance();

            #[cfg(debug_assertions)]
            {
                if let Err(violation) = self.verify_invariants() {
                    panic!("tick {}: {violation}", self.time.tick);
                }
            }
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build(&self.world, &self.time, self.phase, self.generation, events)
    }

    /// Transition Running -> Stopped. Terminal: no further tick mutates
    /// state and the engine cannot be restarted.
    pub fn stop(&mut self) {
        if self.phase == SimPhase::Running {
            self.phase = SimPhase::Stopped;
        }
    }

    /// Get the current engine phase.
    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the active configuration.
    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Get the current grid generation.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Check the structural invariants of the current state.
    /// A violation indicates a defect in the simulation itself.
    pub fn verify_invariants(&self) -> Result<(), InvariantViolation> {
        for (_entity, (turret, pos)) in self.world.query::<(&Turret, &Position)>().iter() {
            if pos.x < turret.bounds_min || pos.x > turret.max_x() {
                return Err(InvariantViolation::TurretOutOfBounds {
                    x: pos.x,
                    min: turret.bounds_min,
                    max: turret.max_x(),
                });
            }
        }

        for (_entity, (projectile, pos)) in
            self.world.query::<(&Projectile, &Position)>().iter()
        {
            if projectile.alive && pos.y < 0.0 {
                return Err(InvariantViolation::StrayProjectile {
                    id: projectile.id,
                    y: pos.y,
                });
            }
        }

        if self.config.targets == TargetPolicy::FixedGrid {
            let capacity = self.config.grid_capacity();
            let live = self
                .world
                .query::<&Target>()
                .iter()
                .filter(|(_, target)| target.alive)
                .count() as u32;
            if live > capacity {
                return Err(InvariantViolation::TargetOverflow { live, capacity });
            }
        }

        Ok(())
    }

    /// Flip the first `count` live targets to dead (for lifecycle tests).
    #[cfg(test)]
    pub fn kill_targets(&mut self, count: usize) {
        let mut remaining = count;
        for (_entity, target) in self.world.query_mut::<&mut Target>() {
            if remaining == 0 {
                break;
            }
            if target.alive {
                target.alive = false;
                remaining -= 1;
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let tick = self.time.tick;

        // 1. Turret movement policy
        self.turret_moved =
            systems::turret::run(&mut self.world, &mut self.rng, &self.config, tick);
        // 2. Projectile integration + expiry
        systems::movement::run(&mut self.world, &mut self.events);
        // 3. Collision detection, applied atomically
        systems::collision::run(&mut self.world, &mut self.events);
        // 4. Scheduled spawning
        systems::spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.next_sprite_id,
            &self.config,
            tick,
            &mut self.created_buffer,
        );
        // 5. Prune dead entities, regenerate an empty grid
        systems::lifecycle::run(
            &mut self.world,
            &mut self.rng,
            &mut self.next_sprite_id,
            &self.config,
            &mut self.generation,
            &mut self.events,
            &mut self.created_buffer,
            &mut self.removed_buffer,
            &mut self.despawn_buffer,
        );
    }
}
