//! Per-room fixed-rate tick loops
//!
//! Each active room gets one spawned task driving the simulation at the
//! configured tick rate. A firing does exactly one fixed step: late ticks
//! are delayed rather than burst, so the loop never "catches up" by running
//! extra steps, and each step assumes exactly `1 / tick_rate` seconds.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

use crate::config::GameConfig;
use crate::util::time::unix_millis;

use super::physics::PhysicsEngine;
use super::registry::RoomRegistry;
use super::snapshot::{Snapshot, SnapshotBuilder};

/// Shutdown signal for one room's loop. Dropping the sender also stops the
/// loop, so loops cannot outlive the scheduler.
struct LoopHandle {
    shutdown_tx: watch::Sender<bool>,
}

/// Starts and stops the per-room tick tasks
pub struct GameLoopScheduler {
    registry: Arc<RoomRegistry>,
    config: Arc<GameConfig>,
    loops: DashMap<String, LoopHandle>,
}

impl GameLoopScheduler {
    pub fn new(registry: Arc<RoomRegistry>, config: Arc<GameConfig>) -> Self {
        Self {
            registry,
            config,
            loops: DashMap::new(),
        }
    }

    /// Begin the fixed-interval loop for a room, handing each tick's snapshot
    /// to `on_tick` for fan-out by the transport collaborator.
    ///
    /// Idempotent: returns `false` without side effects when a loop is
    /// already running or the room is unknown.
    pub fn start<F>(&self, room_id: &str, mut on_tick: F) -> bool
    where
        F: FnMut(Snapshot) + Send + 'static,
    {
        let Some(room) = self.registry.room(room_id) else {
            return false;
        };

        match self.loops.entry(room_id.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(_) => false,
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
                let config = self.config.clone();
                let snapshot_builder = SnapshotBuilder::new(config.clone());
                let id = room_id.to_string();

                tokio::spawn(async move {
                    let tick_duration =
                        Duration::from_micros(1_000_000 / config.tick_rate as u64);
                    let mut ticker = interval(tick_duration);
                    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

                    info!(room_id = %id, tick_rate = config.tick_rate, "Game loop started");

                    loop {
                        tokio::select! {
                            biased;
                            // Fires on stop() and on scheduler drop; a step
                            // already in progress completes first, so stop is
                            // a clean tick boundary
                            _ = shutdown_rx.changed() => break,
                            _ = ticker.tick() => {
                                let snapshot = {
                                    let mut room = room.lock();
                                    for player in room.players.values_mut() {
                                        PhysicsEngine::step(player, &config.platforms, &config);
                                    }
                                    room.tick_count += 1;
                                    room.last_update_ms = unix_millis();
                                    snapshot_builder.build(&room)
                                };
                                on_tick(snapshot);
                            }
                        }
                    }

                    info!(room_id = %id, "Game loop stopped");
                });

                entry.insert(LoopHandle { shutdown_tx });
                true
            }
        }
    }

    /// Cancel a room's loop; no further ticks fire after the signal is
    /// observed. Safe to call when not running.
    pub fn stop(&self, room_id: &str) -> bool {
        if let Some((_, handle)) = self.loops.remove(room_id) {
            let _ = handle.shutdown_tx.send(true);
            true
        } else {
            false
        }
    }

    pub fn is_running(&self, room_id: &str) -> bool {
        self.loops.contains_key(room_id)
    }

    pub fn active_loops(&self) -> usize {
        self.loops.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> GameLoopScheduler {
        let config = Arc::new(GameConfig::default());
        let registry = Arc::new(RoomRegistry::new(config.clone()));
        GameLoopScheduler::new(registry, config)
    }

    #[tokio::test]
    async fn start_requires_an_existing_room() {
        let scheduler = scheduler();
        assert!(!scheduler.start("NOROOM", |_| {}));
        assert!(!scheduler.is_running("NOROOM"));
    }

    #[tokio::test]
    async fn start_is_idempotent() {
        let scheduler = scheduler();
        scheduler.registry.create_room("LOOPAA");

        assert!(scheduler.start("LOOPAA", |_| {}));
        assert!(!scheduler.start("LOOPAA", |_| {}));
        assert_eq!(scheduler.active_loops(), 1);
    }

    #[tokio::test]
    async fn stop_is_safe_when_not_running() {
        let scheduler = scheduler();
        scheduler.registry.create_room("LOOPAA");

        assert!(!scheduler.stop("LOOPAA"));
        assert!(scheduler.start("LOOPAA", |_| {}));
        assert!(scheduler.stop("LOOPAA"));
        assert!(!scheduler.is_running("LOOPAA"));
        assert!(!scheduler.stop("LOOPAA"));
    }
}
