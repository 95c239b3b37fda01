//! # Brawl Kernel
//!
//! Geometry and presentation math for the Brawl combat core.
//!
//! This crate provides the data-side of a fight, independent of combat rules:
//! - Axis-aligned boxes with facing-aware mirroring
//! - The frame geometry table (animations, sprite regions, collision boxes)
//! - Stage bounds
//! - The two-fighter camera with decaying shake
//! - Render handoff (camera-relative sprite and debug box placement)
//!
//! ## Mirroring
//!
//! Boxes are authored for a right-facing actor. A left-facing actor multiplies
//! each box's x offset and width by −1; widths may therefore be negative in
//! world space and every overlap test normalizes edges first.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod camera;
pub mod frames;
pub mod geometry;
pub mod render;
pub mod stage;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::camera::*;
    pub use crate::frames::*;
    pub use crate::geometry::*;
    pub use crate::render::*;
    pub use crate::stage::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use brawl_common::{Direction, FighterState, Vec2};

    #[test]
    fn test_table_boxes_feed_world_overlap() {
        let mut table = FrameGeometryTable::new();
        table.insert_frame(
            "jab",
            FrameRecord::new(
                SpriteRegion::default(),
                Rect::new(-16.0, -80.0, 32.0, 78.0),
                HurtBoxes::ZERO,
                Rect::new(3.0, -70.0, 50.0, 18.0),
            ),
        );
        table.insert_animation(
            FighterState::LightPunch,
            Animation::new(vec![AnimationStep::new("jab", FrameHold::Millis(40))]),
        );

        let hit = table
            .boxes_for(FighterState::LightPunch, 0)
            .hit
            .to_world(Vec2::new(300.0, 220.0), Direction::Left);
        let target = Rect::new(260.0, 150.0, 10.0, 10.0);
        assert!(hit.overlaps(&target));

        let facing_away = table
            .boxes_for(FighterState::LightPunch, 0)
            .hit
            .to_world(Vec2::new(300.0, 220.0), Direction::Right);
        assert!(!facing_away.overlaps(&target));
    }
}
