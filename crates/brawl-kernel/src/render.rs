//! Render handoff.
//!
//! The core never touches pixels. It computes camera-relative placements and
//! passes them to a [`SpriteSurface`], which composites a sheet region with
//! horizontal mirroring and opacity.

use brawl_common::{Direction, Vec2};

use crate::camera::Camera;
use crate::frames::FrameRecord;
use crate::geometry::{BoxKind, FrameBoxes, Rect};

/// Opaque handle of a loaded sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

/// One sprite composite request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    /// Sprite sheet
    pub image: ImageHandle,
    /// Region on the sheet
    pub source: Rect,
    /// Camera-relative anchor; the region extends `source.width * direction` from here
    pub dest: Vec2,
    /// Horizontal mirroring sign
    pub direction: Direction,
    /// Opacity in `[0, 1]`
    pub alpha: f32,
}

/// Drawing capability provided by the host.
pub trait SpriteSurface {
    /// Composites a sheet region at a camera-relative position.
    fn draw_sprite(&mut self, draw: &SpriteDraw);

    /// Outlines a collision box given in camera space. Optional.
    fn draw_box(&mut self, _kind: BoxKind, _rect: Rect) {}
}

/// Computes where a frame's sprite lands for an actor.
///
/// The frame's draw origin is pinned to the actor position, mirrored with
/// the facing so the sprite flips around the actor's feet.
#[must_use]
pub fn sprite_draw(
    image: ImageHandle,
    record: &FrameRecord,
    position: Vec2,
    direction: Direction,
    camera: &Camera,
    alpha: f32,
) -> SpriteDraw {
    let screen = camera.world_to_screen(position);
    let origin = record.sprite.origin;
    SpriteDraw {
        image,
        source: record.sprite.source,
        dest: Vec2::new(
            screen.x.floor() - origin.x * direction.sign(),
            screen.y.floor() - origin.y,
        ),
        direction,
        alpha: alpha.clamp(0.0, 1.0),
    }
}

/// Camera-space boxes of a frame, ready for a debug overlay.
#[must_use]
pub fn debug_boxes(
    boxes: &FrameBoxes,
    position: Vec2,
    direction: Direction,
    camera: &Camera,
) -> Vec<(BoxKind, Rect)> {
    let offset = Vec2::ZERO - camera.position;
    boxes
        .to_world(position, direction)
        .tagged()
        .into_iter()
        .filter(|(_, rect)| !rect.is_empty())
        .map(|(kind, rect)| (kind, rect.translated(offset)))
        .collect()
}
