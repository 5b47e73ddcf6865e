//! Pointer input adapter
//!
//! Turns raw pointer/touch events in screen space into paddle positions, so
//! the simulation never sees platform input types. Behaves like a drag
//! gesture: the paddle follows the pointer while it is pressed.

use serde::{Deserialize, Serialize};

use crate::game_loop::GameLoop;
use crate::sim::GameState;

/// Anything that accepts a horizontal paddle position in arena coordinates
pub trait PaddleControl {
    fn set_paddle_position(&mut self, x: f32);
}

impl PaddleControl for GameState {
    fn set_paddle_position(&mut self, x: f32) {
        GameState::set_paddle_position(self, x);
    }
}

impl PaddleControl for GameLoop {
    fn set_paddle_position(&mut self, x: f32) {
        GameLoop::set_paddle_position(self, x);
    }
}

/// Raw pointer event in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Pressed { x: f32, y: f32 },
    Moved { x: f32, y: f32 },
    Released,
}

/// Maps screen x to arena x: `(screen_x - offset_x) / scale`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub offset_x: f32,
    pub scale: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            scale: 1.0,
        }
    }
}

impl Viewport {
    /// Letterbox the arena into a drawing surface, centered horizontally
    pub fn fit(
        surface_width: f32,
        surface_height: f32,
        arena_width: f32,
        arena_height: f32,
    ) -> Self {
        let scale = (surface_width / arena_width).min(surface_height / arena_height);
        Self {
            offset_x: (surface_width - arena_width * scale) / 2.0,
            scale,
        }
    }

    pub fn to_arena_x(&self, screen_x: f32) -> f32 {
        (screen_x - self.offset_x) / self.scale
    }

    pub fn to_screen_x(&self, arena_x: f32) -> f32 {
        arena_x * self.scale + self.offset_x
    }
}

/// Drag tracker feeding a `PaddleControl`
#[derive(Debug, Clone, Default)]
pub struct PointerInput {
    pub viewport: Viewport,
    dragging: bool,
}

impl PointerInput {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            dragging: false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Apply one event. Returns the arena x sent to the paddle, if any.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        target: &mut impl PaddleControl,
    ) -> Option<f32> {
        let screen_x = match event {
            PointerEvent::Pressed { x, .. } => {
                self.dragging = true;
                x
            }
            PointerEvent::Moved { x, .. } if self.dragging => x,
            PointerEvent::Moved { .. } => return None,
            PointerEvent::Released => {
                self.dragging = false;
                return None;
            }
        };

        let arena_x = self.viewport.to_arena_x(screen_x);
        target.set_paddle_position(arena_x);
        Some(arena_x)
    }
}
