//! Read model for renderers
//!
//! A snapshot is a plain copy of everything a frame needs to draw. Renderers
//! either poll `GameLoop::snapshot` each frame or subscribe as an observer and
//! receive one after every scheduled tick.

use serde::{Deserialize, Serialize};

use crate::sim::{BrickColor, GameEvent, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleView {
    /// Center
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrickView {
    pub id: u32,
    /// Center
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: BrickColor,
}

/// Everything a frame needs, detached from the live state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub tick: u64,
    pub score: u64,
    pub game_over: bool,
    pub arena_width: f32,
    pub arena_height: f32,
    pub ball: BallView,
    pub paddle: PaddleView,
    pub bricks: Vec<BrickView>,
    /// What happened during the tick that produced this snapshot
    pub events: Vec<GameEvent>,
}

impl From<&GameState> for GameSnapshot {
    fn from(state: &GameState) -> Self {
        Self {
            tick: state.time_ticks,
            score: state.score,
            game_over: state.is_game_over(),
            arena_width: state.config.arena_width,
            arena_height: state.config.arena_height,
            ball: BallView {
                x: state.ball.pos.x,
                y: state.ball.pos.y,
                radius: state.ball.radius,
            },
            paddle: PaddleView {
                x: state.paddle.x,
                y: state.paddle.y,
                width: state.paddle.size.x,
                height: state.paddle.size.y,
            },
            bricks: state
                .bricks
                .iter()
                .map(|b| BrickView {
                    id: b.id,
                    x: b.pos.x,
                    y: b.pos.y,
                    width: b.size.x,
                    height: b.size.y,
                    color: b.color,
                })
                .collect(),
            events: state.events.clone(),
        }
    }
}
