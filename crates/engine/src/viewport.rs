//! Viewport state and the world/screen coordinate transform
//!
//! The viewport is the pan offset and zoom scale defining the
//! world-to-screen affine mapping `screen = world * scale + (x, y)`.
//! One viewport exists per editor session; it is reset to identity only
//! by explicit user action.

use ermine_core::{Position, Rect, Size};
use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Minimum zoom scale (10%)
pub const MIN_SCALE: f32 = 0.1;

/// Maximum zoom scale (400%)
pub const MAX_SCALE: f32 = 4.0;

/// Zoom step for wheel events
pub const SCALE_STEP: f32 = 0.05;

// ============================================================================
// Viewport
// ============================================================================

/// Pan offset and zoom scale of the canvas view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Screen-space pan offset, x component
    pub x: f32,

    /// Screen-space pan offset, y component
    pub y: f32,

    /// Zoom scale, clamped to `[MIN_SCALE, MAX_SCALE]`
    pub scale: f32,
}

impl Viewport {
    /// Create a viewport at the identity transform
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }

    // ========================================================================
    // Coordinate Transformations
    // ========================================================================

    /// Convert a world-space point to screen space
    pub fn world_to_screen(&self, world: Position) -> Position {
        Position::new(world.x * self.scale + self.x, world.y * self.scale + self.y)
    }

    /// Convert a screen-space point to world space
    pub fn screen_to_world(&self, screen: Position) -> Position {
        Position::new(
            (screen.x - self.x) / self.scale,
            (screen.y - self.y) / self.scale,
        )
    }

    /// Convert a screen-space rectangle to world space
    pub fn rect_to_world(&self, rect: Rect) -> Rect {
        Rect::new(
            self.screen_to_world(rect.position),
            Size::new(rect.size.width / self.scale, rect.size.height / self.scale),
        )
    }

    /// Convert a world-space rectangle to screen space
    pub fn rect_to_screen(&self, rect: Rect) -> Rect {
        Rect::new(
            self.world_to_screen(rect.position),
            Size::new(rect.size.width * self.scale, rect.size.height * self.scale),
        )
    }

    // ========================================================================
    // Zoom & Pan
    // ========================================================================

    /// Zoom by a delta amount, keeping the world point under the focal
    /// screen point fixed
    ///
    /// The pan offset is recomputed from the pre-zoom inverse-mapped
    /// world point rather than adjusting the scale in place.
    pub fn zoom_at(&mut self, focal: Position, delta: f32) {
        let old_scale = self.scale;
        let new_scale = (old_scale + delta).clamp(MIN_SCALE, MAX_SCALE);

        if (new_scale - old_scale).abs() < f32::EPSILON {
            return;
        }

        let world = self.screen_to_world(focal);

        self.scale = new_scale;
        self.x = focal.x - world.x * new_scale;
        self.y = focal.y - world.y * new_scale;
    }

    /// Pan by a screen-space delta; pure translation with no scale
    /// interaction
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    /// Reset to the identity transform
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Current zoom as a display percentage
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
