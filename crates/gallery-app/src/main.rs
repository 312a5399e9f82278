//! Demo runner: drives the gallery simulation at the nominal tick rate
//! and renders through structured log events.
//!
//! Run with `RUST_LOG=debug` (or `trace` for per-sprite output) to watch
//! the animation unfold in the terminal.

mod game_loop;
mod renderer;

use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use gallery_core::config::{GalleryConfig, MovementPolicy, TargetPolicy};
use gallery_sim::engine::SimulationEngine;

use crate::game_loop::GameLoopCommand;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MovementArg {
    ReflectingWalk,
    TimedRandomWalk,
}

impl From<MovementArg> for MovementPolicy {
    fn from(arg: MovementArg) -> Self {
        match arg {
            MovementArg::ReflectingWalk => MovementPolicy::ReflectingWalk,
            MovementArg::TimedRandomWalk => MovementPolicy::TimedRandomWalk,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TargetArg {
    FixedGrid,
    Continuous,
}

impl From<TargetArg> for TargetPolicy {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::FixedGrid => TargetPolicy::FixedGrid,
            TargetArg::Continuous => TargetPolicy::Continuous,
        }
    }
}

/// Self-playing shooting gallery.
#[derive(Debug, Parser)]
#[command(name = "gallery")]
struct Args {
    /// RNG seed; the same seed replays the same animation.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// How long to run, in seconds.
    #[arg(long, default_value_t = 10)]
    duration_secs: u64,

    /// Turret motion policy.
    #[arg(long, value_enum, default_value = "timed-random-walk")]
    movement: MovementArg,

    /// Target arrangement policy.
    #[arg(long, value_enum, default_value = "fixed-grid")]
    targets: TargetArg,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = GalleryConfig {
        seed: args.seed,
        movement: args.movement.into(),
        targets: args.targets.into(),
        ..Default::default()
    };

    let engine = match SimulationEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let (handle, cmd_tx, latest) = game_loop::spawn(engine);

    std::thread::sleep(Duration::from_secs(args.duration_secs));
    let _ = cmd_tx.send(GameLoopCommand::Shutdown);
    let _ = handle.join();

    if let Some(snapshot) = latest.lock().ok().and_then(|slot| slot.clone()) {
        info!(
            tick = snapshot.time.tick,
            targets = snapshot.targets.len(),
            projectiles = snapshot.projectiles.len(),
            generation = snapshot.generation,
            "final state"
        );
    }
}
