//! Stage dimensions shared by the camera and combatant physics.

use serde::{Deserialize, Serialize};

/// Stage width in world pixels.
pub const STAGE_WIDTH: f32 = 764.0;
/// Stage height in world pixels.
pub const STAGE_HEIGHT: f32 = 248.0;
/// Horizontal padding before the playable stage starts.
pub const STAGE_PADDING: f32 = 32.0;
/// Y of the floor combatants stand on.
pub const STAGE_FLOOR: f32 = 220.0;
/// Dead-zone margin kept between a combatant and the viewport edge.
pub const SCROLL_BOUNDARY: f32 = 100.0;

/// World-space bounds of one stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageBounds {
    /// Stage width
    pub width: f32,
    /// Stage height
    pub height: f32,
    /// Horizontal padding
    pub padding: f32,
    /// Floor height
    pub floor: f32,
    /// Camera dead-zone margin
    pub scroll_boundary: f32,
}

impl Default for StageBounds {
    fn default() -> Self {
        Self {
            width: STAGE_WIDTH,
            height: STAGE_HEIGHT,
            padding: STAGE_PADDING,
            floor: STAGE_FLOOR,
            scroll_boundary: SCROLL_BOUNDARY,
        }
    }
}

impl StageBounds {
    /// Leftmost X a combatant may occupy.
    #[must_use]
    pub fn left(&self) -> f32 {
        self.padding
    }

    /// Rightmost X a combatant may occupy.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.width + self.padding
    }

    /// Horizontal center of the stage.
    #[must_use]
    pub fn mid_x(&self) -> f32 {
        self.padding + self.width / 2.0
    }

    /// Clamps an X coordinate into the stage.
    #[must_use]
    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(self.left(), self.right())
    }

    /// Valid camera X range for a viewport of `viewport_width`.
    ///
    /// Collapses to the left edge when the viewport is wider than the stage.
    #[must_use]
    pub fn camera_x_range(&self, viewport_width: f32) -> (f32, f32) {
        let min = self.padding;
        let max = (self.width + self.padding - viewport_width).max(min);
        (min, max)
    }

    /// Valid camera Y range for a viewport of `viewport_height`.
    #[must_use]
    pub fn camera_y_range(&self, viewport_height: f32) -> (f32, f32) {
        (0.0, (self.height - viewport_height).max(0.0))
    }
}
