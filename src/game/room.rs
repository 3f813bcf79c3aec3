//! Room and player state owned by the registry

use std::collections::HashMap;

use crate::config::GameConfig;
use crate::util::time::unix_millis;

use super::{InputFlags, PlayerId, RoomId};

/// Fixed spawn points, assigned round-robin by player count at join time.
/// Indices are reused as players churn; spawns are not globally unique.
pub const SPAWN_POINTS: [(f32, f32); 4] = [(100.0, 700.0), (300.0, 700.0), (500.0, 700.0), (700.0, 700.0)];

/// Authoritative per-player simulation state.
///
/// Position, velocity and `grounded` are mutated only by the physics step;
/// `inputs` and `last_accepted_seq` only by the input sequencer.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub id: PlayerId,
    pub username: String,

    // Position and movement
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub grounded: bool,

    // Input tracking
    pub inputs: InputFlags,
    pub last_accepted_seq: u32,
}

impl PlayerState {
    pub fn new(id: PlayerId, username: String, spawn_x: f32, spawn_y: f32, size: f32) -> Self {
        Self {
            id,
            username,
            x: spawn_x,
            y: spawn_y,
            vx: 0.0,
            vy: 0.0,
            width: size,
            height: size,
            grounded: false,
            inputs: InputFlags::default(),
            last_accepted_seq: 0,
        }
    }
}

/// Mutable aggregate for one room
#[derive(Debug)]
pub struct RoomState {
    pub id: RoomId,
    pub players: HashMap<PlayerId, PlayerState>,
    pub tick_count: u64,
    pub last_update_ms: u64,
}

impl RoomState {
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            players: HashMap::new(),
            tick_count: 0,
            last_update_ms: unix_millis(),
        }
    }

    /// Insert a player at the next round-robin spawn point. A missing
    /// username defaults to "Player" plus a short id prefix.
    pub fn add_player(&mut self, player_id: PlayerId, username: Option<&str>, config: &GameConfig) {
        let (spawn_x, spawn_y) = SPAWN_POINTS[self.players.len() % SPAWN_POINTS.len()];
        let username = match username {
            Some(name) => name.to_string(),
            None => format!("Player{}", &player_id.to_string()[..4]),
        };

        self.players.insert(
            player_id,
            PlayerState::new(player_id, username, spawn_x, spawn_y, config.player_size),
        );
    }

    pub fn remove_player(&mut self, player_id: &PlayerId) -> bool {
        self.players.remove(player_id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
