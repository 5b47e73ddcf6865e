//! Game configuration
//!
//! Arena geometry, entity sizes and timing. Defaults reproduce the classic
//! layout; any subset of fields can be overridden from a JSON file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::BrickLayout;

/// Errors that can occur while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Arena, entity and timing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena_width: f32,
    pub arena_height: f32,

    pub ball_radius: f32,
    /// Distance of the spawn point above the arena bottom
    pub ball_start_offset: f32,
    pub ball_start_velocity: Vec2,

    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Distance of the paddle center above the arena bottom
    pub paddle_offset: f32,

    pub bricks: BrickLayout,
    pub brick_score: u64,

    /// Scheduler period in milliseconds
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            ball_radius: BALL_RADIUS,
            ball_start_offset: BALL_START_OFFSET,
            ball_start_velocity: Vec2::new(BALL_START_VELOCITY.0, BALL_START_VELOCITY.1),

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_offset: PADDLE_OFFSET,

            bricks: BrickLayout::default(),
            brick_score: BRICK_SCORE,

            tick_interval_ms: TICK_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("ball_radius", self.ball_radius),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("bricks.brick_width", self.bricks.brick_width),
            ("bricks.brick_height", self.bricks.brick_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }

        // Paddle clamp range would be empty
        if self.paddle_width > self.arena_width {
            return Err(ConfigError::Invalid {
                field: "paddle_width",
                reason: format!(
                    "{} is wider than the arena ({})",
                    self.paddle_width, self.arena_width
                ),
            });
        }

        if !self.ball_start_velocity.is_finite() {
            return Err(ConfigError::Invalid {
                field: "ball_start_velocity",
                reason: "must be finite".to_string(),
            });
        }

        let bricks = self.bricks.rows.checked_mul(self.bricks.columns);
        if !bricks.is_some_and(|n| n <= MAX_BRICKS) {
            return Err(ConfigError::Invalid {
                field: "bricks",
                reason: format!(
                    "{} x {} grid exceeds {} bricks",
                    self.bricks.rows, self.bricks.columns, MAX_BRICKS
                ),
            });
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "tick_interval_ms",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Scheduler period
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Ball spawn point
    pub fn ball_start(&self) -> Vec2 {
        Vec2::new(
            self.arena_width / 2.0,
            self.arena_height - self.ball_start_offset,
        )
    }

    /// Fixed vertical center of the paddle
    pub fn paddle_y(&self) -> f32 {
        self.arena_height - self.paddle_offset
    }

    /// Valid range for the paddle center
    pub fn paddle_range(&self) -> (f32, f32) {
        let half = self.paddle_width / 2.0;
        (half, self.arena_width - half)
    }
}
