//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick = one unit of time)
//! - Stable iteration order (bricks in creation order)
//! - No rendering, scheduling or platform dependencies

pub mod collision;
pub mod layout;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use layout::BrickLayout;
pub use state::{Ball, Brick, BrickColor, GameEvent, GamePhase, GameState, Paddle, WallSide};
pub use tick::tick;
