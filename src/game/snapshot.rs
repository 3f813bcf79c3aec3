//! Snapshot building for broadcast
//!
//! A snapshot is the full, read-only state of one room at one tick, produced
//! once per tick for fan-out to every client of that room. No delta
//! compression; internal fields (input flags, accepted sequence) are
//! excluded from the wire view.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, Platform};

use super::room::RoomState;
use super::PlayerId;

/// One player's broadcast view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub username: String,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub grounded: bool,
}

/// Full room state emitted once per tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Server tick number
    pub tick: u64,
    /// Unix millis of the tick that produced this snapshot
    pub timestamp: u64,
    /// All player states
    pub players: Vec<PlayerView>,
    /// Static platform list (identical every tick)
    pub platforms: Vec<Platform>,
}

/// Projects room state into immutable snapshots
pub struct SnapshotBuilder {
    config: Arc<GameConfig>,
}

impl SnapshotBuilder {
    pub fn new(config: Arc<GameConfig>) -> Self {
        Self { config }
    }

    /// Build a snapshot from a room. Read-only projection; the room is not
    /// mutated.
    pub fn build(&self, room: &RoomState) -> Snapshot {
        let players: Vec<PlayerView> = room
            .players
            .values()
            .map(|p| PlayerView {
                id: p.id,
                username: p.username.clone(),
                x: p.x,
                y: p.y,
                vx: p.vx,
                vy: p.vy,
                grounded: p.grounded,
            })
            .collect();

        Snapshot {
            tick: room.tick_count,
            timestamp: room.last_update_ms,
            players,
            platforms: self.config.platforms.clone(),
        }
    }
}
