//! Brick Breaker - a single-screen breakout arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, paddle, bricks, collisions)
//! - `game_loop`: Fixed-rate scheduler driving the simulation
//! - `input`: Pointer events to paddle position
//! - `snapshot`: Read model handed to renderers
//! - `config`: Data-driven arena and timing parameters

pub mod config;
pub mod game_loop;
pub mod input;
pub mod sim;
pub mod snapshot;

pub use config::{ConfigError, GameConfig};
pub use game_loop::{GameLoop, GameLoopError, Observer};
pub use input::{PaddleControl, PointerEvent, PointerInput, Viewport};
pub use snapshot::GameSnapshot;

/// Game configuration constants (defaults for `GameConfig`)
pub mod consts {
    /// Simulation rate (one tick every 10ms)
    pub const TICK_HZ: u64 = 100;
    pub const TICK_INTERVAL_MS: u64 = 1000 / TICK_HZ;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 500.0;
    pub const ARENA_HEIGHT: f32 = 800.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 15.0;
    /// Ball spawns this far above the arena bottom
    pub const BALL_START_OFFSET: f32 = 300.0;
    /// Pixels per tick
    pub const BALL_START_VELOCITY: (f32, f32) = (2.0, -2.0);

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Paddle center sits this far above the arena bottom
    pub const PADDLE_OFFSET: f32 = 80.0;

    /// Brick grid defaults
    pub const BRICK_ROWS: u32 = 5;
    pub const BRICK_COLUMNS: u32 = 7;
    pub const BRICK_WIDTH: f32 = 60.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_START_X: f32 = 40.0;
    pub const BRICK_START_Y: f32 = 100.0;
    pub const BRICK_GAP_X: f32 = 10.0;
    pub const BRICK_GAP_Y: f32 = 5.0;
    /// Upper bound on `rows * columns` accepted from a config
    pub const MAX_BRICKS: u32 = 10_000;

    /// Points per destroyed brick
    pub const BRICK_SCORE: u64 = 10;
}
