//! Configuration module - simulation constants with environment overrides

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Static axis-aligned platform geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Platform {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Game configuration shared read-only by every room.
///
/// Built once at startup and passed by `Arc` into the registry and scheduler;
/// never mutated afterward. Injectable so tests can run alternate tick rates
/// or map layouts.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// World width in pixels
    pub map_width: f32,
    /// World height in pixels
    pub map_height: f32,
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative = up)
    pub jump_strength: f32,
    /// Horizontal speed while a direction is held
    pub move_speed: f32,
    /// Player AABB side length
    pub player_size: f32,
    /// Simulation steps per second
    pub tick_rate: u32,
    /// Static platform list, fixed order (ground first)
    pub platforms: Vec<Platform>,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_width: 1600.0,
            map_height: 900.0,
            gravity: 0.8,
            jump_strength: -15.0,
            move_speed: 5.0,
            player_size: 32.0,
            tick_rate: 60,
            platforms: vec![
                Platform::new(0.0, 850.0, 1600.0, 50.0), // Ground
                Platform::new(400.0, 650.0, 300.0, 20.0),
                Platform::new(900.0, 500.0, 300.0, 20.0),
                Platform::new(200.0, 400.0, 200.0, 20.0),
                Platform::new(1100.0, 400.0, 200.0, 20.0),
            ],
            log_level: "info".to_string(),
        }
    }
}

impl GameConfig {
    /// Load configuration, applying environment variable overrides on top of
    /// the default constants
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        config.map_width = parse_var("MAP_WIDTH", config.map_width)?;
        config.map_height = parse_var("MAP_HEIGHT", config.map_height)?;
        config.gravity = parse_var("GRAVITY", config.gravity)?;
        config.jump_strength = parse_var("JUMP_STRENGTH", config.jump_strength)?;
        config.move_speed = parse_var("MOVE_SPEED", config.move_speed)?;
        config.player_size = parse_var("PLAYER_SIZE", config.player_size)?;
        config.tick_rate = parse_var("TICK_RATE", config.tick_rate)?;

        if config.tick_rate == 0 {
            return Err(ConfigError::Invalid("TICK_RATE"));
        }

        if let Ok(level) = env::var("LOG_LEVEL") {
            config.log_level = level;
        }

        Ok(config)
    }

    /// Seconds each fixed step represents, independent of wall time
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}

/// Parse an env var override, falling back to the default when unset
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
