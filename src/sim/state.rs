//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Ball fell past the bottom edge; only a reset leaves this phase
    GameOver,
}

/// Arena wall the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSide {
    Left,
    Right,
    Top,
}

/// Something that happened during a tick (for audio/effects/logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    WallBounce { side: WallSide },
    PaddleHit,
    BrickDestroyed { id: u32, score: u64 },
    GameOver { score: u64 },
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn aabb(&self) -> Aabb {
        Aabb::around_circle(self.pos, self.radius)
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Horizontal center, always within `GameConfig::paddle_range`
    pub x: f32,
    /// Fixed vertical center
    pub y: f32,
    pub size: Vec2,
}

impl Paddle {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(Vec2::new(self.x, self.y), self.size)
    }
}

/// Brick color tag, alternating by row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickColor {
    Red,
    Green,
}

/// A brick entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    pub color: BrickColor,
}

impl Brick {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Geometry and scoring parameters
    pub config: GameConfig,
    pub score: u64,
    /// Simulation tick counter since the last reset
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Remaining bricks in creation (row-major) order
    pub bricks: Vec<Brick>,
    /// Events produced by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh game
    pub fn new(config: GameConfig) -> Self {
        Self::fresh(config, 1)
    }

    fn fresh(config: GameConfig, next_id: u32) -> Self {
        let ball = Ball {
            pos: config.ball_start(),
            vel: config.ball_start_velocity,
            radius: config.ball_radius,
        };
        let paddle = Paddle {
            x: config.arena_width / 2.0,
            y: config.paddle_y(),
            size: Vec2::new(config.paddle_width, config.paddle_height),
        };
        let mut state = Self {
            config,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            ball,
            paddle,
            bricks: Vec::new(),
            events: Vec::new(),
            next_id,
        };
        state.spawn_bricks();
        state
    }

    /// Restore initial conditions: ball, paddle, full brick grid, score
    ///
    /// Brick ids keep counting up so they stay unique across restarts.
    pub fn reset(&mut self) {
        *self = Self::fresh(self.config.clone(), self.next_id);
    }

    /// Replace the brick set with a fresh grid
    fn spawn_bricks(&mut self) {
        let first_id = self.next_id;
        self.bricks = self.config.bricks.layout(first_id);
        self.next_id = first_id.wrapping_add(self.bricks.len() as u32);
    }

    /// Move the paddle center, clamped to the arena. NaN is ignored.
    pub fn set_paddle_position(&mut self, x: f32) {
        if x.is_nan() {
            return;
        }
        let (min, max) = self.config.paddle_range();
        self.paddle.x = x.max(min).min(max);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
