//! Initial brick grid generation

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Brick, BrickColor};
use crate::consts::*;

/// Brick grid parameters
///
/// Positions are brick centers: brick `(row, col)` sits at
/// `start + (col * (width + gap_x), row * (height + gap_y))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickLayout {
    pub rows: u32,
    pub columns: u32,
    pub brick_width: f32,
    pub brick_height: f32,
    pub start_x: f32,
    pub start_y: f32,
    pub horizontal_gap: f32,
    pub vertical_gap: f32,
}

impl Default for BrickLayout {
    fn default() -> Self {
        Self {
            rows: BRICK_ROWS,
            columns: BRICK_COLUMNS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            start_x: BRICK_START_X,
            start_y: BRICK_START_Y,
            horizontal_gap: BRICK_GAP_X,
            vertical_gap: BRICK_GAP_Y,
        }
    }
}

impl BrickLayout {
    /// Number of bricks a full grid holds
    pub fn count(&self) -> usize {
        (self.rows as usize).saturating_mul(self.columns as usize)
    }

    /// Lay out the full grid in row-major order, ids counting up from `first_id`
    pub fn layout(&self, first_id: u32) -> Vec<Brick> {
        let size = Vec2::new(self.brick_width, self.brick_height);
        let step_x = self.brick_width + self.horizontal_gap;
        let step_y = self.brick_height + self.vertical_gap;

        let mut bricks = Vec::with_capacity(self.count());
        let mut id = first_id;
        for row in 0..self.rows {
            let color = if row % 2 == 0 {
                BrickColor::Red
            } else {
                BrickColor::Green
            };
            for col in 0..self.columns {
                bricks.push(Brick {
                    id,
                    pos: Vec2::new(
                        self.start_x + col as f32 * step_x,
                        self.start_y + row as f32 * step_y,
                    ),
                    size,
                    color,
                });
                id = id.wrapping_add(1);
            }
        }
        bricks
    }
}
