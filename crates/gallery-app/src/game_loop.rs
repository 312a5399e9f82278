//! Game loop thread — runs the simulation at the nominal tick rate.
//!
//! The engine moves into this thread; commands arrive via `mpsc` and the
//! latest snapshot is stored in shared state for synchronous polling.
//! At most one tick is ever in flight, and none after shutdown.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use gallery_core::constants::TICK_RATE;
use gallery_core::events::SimEvent;
use gallery_core::state::SceneSnapshot;
use gallery_sim::engine::SimulationEngine;

use crate::renderer::TracingRenderer;

/// Commands accepted by the game loop.
#[derive(Debug)]
pub enum GameLoopCommand {
    Shutdown,
}

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Shared handle to the most recent snapshot.
pub type LatestSnapshot = Arc<Mutex<Option<SceneSnapshot>>>;

/// Spawn the game loop in a new thread.
///
/// Returns the join handle, the command sender, and the snapshot slot.
pub fn spawn(
    engine: SimulationEngine,
) -> (JoinHandle<()>, mpsc::Sender<GameLoopCommand>, LatestSnapshot) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest: LatestSnapshot = Arc::new(Mutex::new(None));
    let latest_for_loop = Arc::clone(&latest);

    let handle = std::thread::Builder::new()
        .name("gallery-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, cmd_rx, &latest_for_loop);
        })
        .expect("Failed to spawn game loop thread");

    (handle, cmd_tx, latest)
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest: &Mutex<Option<SceneSnapshot>>,
) {
    let mut renderer = TracingRenderer::default();
    engine.start(&mut renderer);
    info!(live = renderer.live(), "simulation started");

    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Shutdown) => {
                    engine.stop();
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    engine.stop();
                    return;
                }
            }
        }

        // 2. Advance one tick
        let snapshot = engine.tick(&mut renderer);

        // 3. Surface the tick's events
        for event in &snapshot.events {
            match event {
                SimEvent::TargetDestroyed { id } => debug!(id = *id, "target destroyed"),
                SimEvent::ProjectileExpired { id } => debug!(id = *id, "projectile expired"),
                SimEvent::GridRegenerated { generation } => {
                    info!(generation = *generation, "grid regenerated")
                }
            }
        }

        // 4. Periodic status line, once per simulated second
        if snapshot.time.tick % TICK_RATE as u64 == 0 {
            debug!(
                tick = snapshot.time.tick,
                targets = snapshot.targets.len(),
                projectiles = snapshot.projectiles.len(),
                generation = snapshot.generation,
                "status"
            );
        }

        // 5. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest.lock() {
            *lock = Some(snapshot);
        }

        // 6. Sleep until the next tick boundary
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind — reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}
