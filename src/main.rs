//! Headless smoke-run of the simulation core.
//!
//! Boots one demo room with a couple of simulated players and drives the
//! tick loop until ctrl-c. Useful for checking tick cadence and log output
//! without a transport in front of the core.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use platformer_core::{
    allocate_room_code, init_tracing, GameConfig, GameLoopScheduler, InputFlags, InputSequencer,
    RoomRegistry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Arc::new(GameConfig::from_env()?);

    // Initialize tracing
    init_tracing(&config.log_level);

    info!("Starting platformer simulation core (headless)");
    info!(tick_rate = config.tick_rate, "Configuration loaded");

    let registry = Arc::new(RoomRegistry::new(config.clone()));
    let scheduler = GameLoopScheduler::new(registry.clone(), config.clone());
    let sequencer = InputSequencer::new(registry.clone());

    // Allocate a demo room the way the persistence collaborator would
    let room_id = {
        let mut rng = rand::thread_rng();
        allocate_room_code(&mut rng, |code| registry.contains(code))?
    };
    registry.create_room(&room_id);

    let walker = Uuid::new_v4();
    let idler = Uuid::new_v4();
    registry.add_player(&room_id, walker, Some("walker"));
    registry.add_player(&room_id, idler, None);

    // Keep one player pacing right so the log line shows movement
    sequencer.submit(&room_id, walker, InputFlags::new(false, true, false), 1);

    let tick_rate = config.tick_rate as u64;
    let ticks_seen = Arc::new(AtomicU64::new(0));
    let counter = ticks_seen.clone();
    scheduler.start(&room_id, move |snapshot| {
        let seen = counter.fetch_add(1, Ordering::Relaxed) + 1;
        if seen % tick_rate == 0 {
            info!(
                tick = snapshot.tick,
                players = snapshot.players.len(),
                x = snapshot.players.first().map(|p| p.x).unwrap_or(0.0),
                "Snapshot cadence"
            );
        }
    });

    info!(room_id = %room_id, "Demo room running, press ctrl-c to stop");

    shutdown_signal().await;

    scheduler.stop(&room_id);
    registry.remove_room(&room_id);

    info!("Shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        }
    }
}
