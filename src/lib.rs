//! Platformer Core - server-authoritative simulation engine
//!
//! Room-scoped, fixed-timestep simulation for a multiplayer 2D platformer:
//! - Ingests per-player input, sequenced against out-of-order delivery
//! - Advances kinematic state deterministically at a fixed tick rate
//! - Resolves AABB collisions against static platform geometry
//! - Emits a full state snapshot every tick for broadcast
//!
//! Transport, persistence, and asset delivery are external collaborators:
//! they call the room/player lifecycle operations here and fan the emitted
//! snapshots out to clients.

pub mod config;
pub mod game;
pub mod util;

pub use config::{ConfigError, GameConfig, Platform};
pub use game::{
    GameLoopScheduler, InputFlags, InputSequencer, PhysicsEngine, PlayerId, PlayerState,
    PlayerView, RoomId, RoomRegistry, RoomState, Snapshot, SnapshotBuilder, SubmitOutcome,
};
pub use util::codes::{allocate_room_code, generate_room_code, RoomCodeError};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging
pub fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}
