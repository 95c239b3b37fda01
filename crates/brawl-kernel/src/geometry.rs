//! Axis-aligned boxes in actor-local and world space.
//!
//! Local boxes are authored for a right-facing actor. Facing left mirrors a box
//! around the actor's origin by multiplying both the x offset and the width by
//! the direction sign, so world-space widths may be negative. Every query on a
//! [`Rect`] therefore normalizes with `min(x, x + width)` as the left edge.

use brawl_common::{Direction, Vec2};
use serde::{Deserialize, Serialize};

/// Rectangle as `x, y, width, height`.
///
/// Width and height may be negative after mirroring; edges are always
/// computed from the normalized extents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Rect {
    /// X of the authored origin corner
    pub x: f32,
    /// Y of the authored origin corner
    pub y: f32,
    /// Signed width
    pub width: f32,
    /// Signed height
    pub height: f32,
}

impl Rect {
    /// The all-zero box used for missing data and inactive hit boxes.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a rectangle without validation.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a local box from authored `[x, y, w, h]` numbers.
    ///
    /// Non-finite values become zero and negative sizes are folded back so
    /// the result has non-negative width and height.
    #[must_use]
    pub fn from_authored(values: [f32; 4]) -> Self {
        let [x, y, w, h] = values.map(|v| if v.is_finite() { v } else { 0.0 });
        Self::new(x, y, w, h).normalized()
    }

    /// Left edge.
    #[must_use]
    pub fn left(&self) -> f32 {
        self.x.min(self.x + self.width)
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x.max(self.x + self.width)
    }

    /// Top edge.
    #[must_use]
    pub fn top(&self) -> f32 {
        self.y.min(self.y + self.height)
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y.max(self.y + self.height)
    }

    /// Horizontal center.
    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.x + self.width * 0.5
    }

    /// Equivalent rectangle with non-negative width and height.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self::new(
            self.left(),
            self.top(),
            self.width.abs(),
            self.height.abs(),
        )
    }

    /// True if the box covers no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// Mirrors the box around the local origin for the given facing.
    ///
    /// Involutive for `Left` and the identity for `Right`.
    #[must_use]
    pub fn mirrored(&self, direction: Direction) -> Self {
        let sign = direction.sign();
        Self::new(self.x * sign, self.y, self.width * sign, self.height)
    }

    /// Places a local box in world space for an actor at `origin`.
    ///
    /// `world_x = origin.x + x * dir`, `world_width = width * dir`.
    #[must_use]
    pub fn to_world(&self, origin: Vec2, direction: Direction) -> Self {
        let mirrored = self.mirrored(direction);
        Self::new(
            origin.x + mirrored.x,
            origin.y + mirrored.y,
            mirrored.width,
            mirrored.height,
        )
    }

    /// Returns the box shifted by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Strict overlap test; empty boxes never overlap anything.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Horizontal penetration depth (zero when separated).
    #[must_use]
    pub fn horizontal_overlap(&self, other: &Rect) -> f32 {
        (self.right().min(other.right()) - self.left().max(other.left())).max(0.0)
    }
}

impl From<[f32; 4]> for Rect {
    fn from(values: [f32; 4]) -> Self {
        Self::from_authored(values)
    }
}

impl From<Rect> for [f32; 4] {
    fn from(rect: Rect) -> Self {
        [rect.x, rect.y, rect.width, rect.height]
    }
}

/// Hurt boxes of one frame, checked in head, body, feet order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[Rect; 3]", into = "[Rect; 3]")]
pub struct HurtBoxes {
    /// Head region
    pub head: Rect,
    /// Body region
    pub body: Rect,
    /// Feet region
    pub feet: Rect,
}

impl HurtBoxes {
    /// All-zero hurt boxes.
    pub const ZERO: Self = Self::new(Rect::ZERO, Rect::ZERO, Rect::ZERO);

    /// Creates a hurt box triple.
    #[must_use]
    pub const fn new(head: Rect, body: Rect, feet: Rect) -> Self {
        Self { head, body, feet }
    }

    /// Boxes paired with their location in priority order.
    #[must_use]
    pub fn prioritized(&self) -> [(HurtLocation, Rect); 3] {
        [
            (HurtLocation::Head, self.head),
            (HurtLocation::Body, self.body),
            (HurtLocation::Feet, self.feet),
        ]
    }
}

impl From<[Rect; 3]> for HurtBoxes {
    fn from([head, body, feet]: [Rect; 3]) -> Self {
        Self::new(head, body, feet)
    }
}

impl From<HurtBoxes> for [Rect; 3] {
    fn from(boxes: HurtBoxes) -> Self {
        [boxes.head, boxes.body, boxes.feet]
    }
}

/// Region of the defender struck by a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HurtLocation {
    /// Head hurt box
    Head,
    /// Body hurt box
    Body,
    /// Feet hurt box
    Feet,
}

/// Kind of collision box, used when handing boxes to a debug renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoxKind {
    /// Solid-body separation box
    Push,
    /// Active attack box
    Hit,
    /// Hurt box at a location
    Hurt(HurtLocation),
}

/// Every box of one frame, in actor-local space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameBoxes {
    /// Push box
    pub push: Rect,
    /// Hurt boxes
    pub hurt: HurtBoxes,
    /// Hit box (zero when the frame has no active attack)
    pub hit: Rect,
}

impl FrameBoxes {
    /// All-zero fallback geometry.
    pub const ZERO: Self = Self {
        push: Rect::ZERO,
        hurt: HurtBoxes::ZERO,
        hit: Rect::ZERO,
    };

    /// Transforms every box into world space.
    #[must_use]
    pub fn to_world(&self, origin: Vec2, direction: Direction) -> Self {
        Self {
            push: self.push.to_world(origin, direction),
            hurt: HurtBoxes::new(
                self.hurt.head.to_world(origin, direction),
                self.hurt.body.to_world(origin, direction),
                self.hurt.feet.to_world(origin, direction),
            ),
            hit: self.hit.to_world(origin, direction),
        }
    }

    /// Boxes tagged with their kind, push first and hit last.
    #[must_use]
    pub fn tagged(&self) -> [(BoxKind, Rect); 5] {
        [
            (BoxKind::Push, self.push),
            (BoxKind::Hurt(HurtLocation::Head), self.hurt.head),
            (BoxKind::Hurt(HurtLocation::Body), self.hurt.body),
            (BoxKind::Hurt(HurtLocation::Feet), self.hurt.feet),
            (BoxKind::Hit, self.hit),
        ]
    }
}

/// Parses a numeric authoring input, rounding to whole pixels.
///
/// Anything that is not a finite number coerces to zero.
#[must_use]
pub fn coerce_coord(input: &str) -> f32 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map_or(0.0, |v| v.round() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_authored_normalizes() {
        let rect = Rect::from_authored([10.0, 5.0, -4.0, -2.0]);
        assert_eq!(rect, Rect::new(6.0, 3.0, 4.0, 2.0));

        let rect = Rect::from_authored([f32::NAN, 1.0, f32::INFINITY, 2.0]);
        assert_eq!(rect, Rect::new(0.0, 1.0, 0.0, 2.0));
    }

    #[test]
    fn test_to_world_mirrors_left() {
        let local = Rect::new(3.0, -70.0, 50.0, 18.0);
        let origin = Vec2::new(100.0, 200.0);

        let right = local.to_world(origin, Direction::Right);
        assert_eq!(right, Rect::new(103.0, 130.0, 50.0, 18.0));

        let left = local.to_world(origin, Direction::Left);
        assert_eq!(left, Rect::new(97.0, 130.0, -50.0, 18.0));
        assert!((left.left() - 47.0).abs() < f32::EPSILON);
        assert!((left.right() - 97.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_overlap_with_negative_width() {
        let a = Rect::new(100.0, 0.0, -50.0, 10.0); // spans 50..100
        let b = Rect::new(60.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let c = Rect::new(100.0, 0.0, 10.0, 10.0); // touching edge only
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_empty_box_never_overlaps() {
        let big = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(!Rect::ZERO.overlaps(&big));
        assert!(!Rect::new(50.0, 50.0, 0.0, 10.0).overlaps(&big));
    }

    #[test]
    fn test_horizontal_overlap() {
        let a = Rect::new(0.0, 0.0, 32.0, 10.0);
        let b = Rect::new(20.0, 0.0, 32.0, 10.0);
        assert!((a.horizontal_overlap(&b) - 12.0).abs() < f32::EPSILON);
        let c = Rect::new(40.0, 0.0, 10.0, 10.0);
        assert_eq!(a.horizontal_overlap(&c), 0.0);
    }

    #[test]
    fn test_coerce_coord() {
        assert_eq!(coerce_coord("12"), 12.0);
        assert_eq!(coerce_coord(" -7.6 "), -8.0);
        assert_eq!(coerce_coord("abc"), 0.0);
        assert_eq!(coerce_coord(""), 0.0);
        assert_eq!(coerce_coord("NaN"), 0.0);
        assert_eq!(coerce_coord("inf"), 0.0);
    }

    #[test]
    fn test_hurt_priority_order() {
        let boxes = HurtBoxes::new(
            Rect::new(0.0, 0.0, 1.0, 1.0),
            Rect::new(0.0, 1.0, 1.0, 1.0),
            Rect::new(0.0, 2.0, 1.0, 1.0),
        );
        let order: Vec<_> = boxes.prioritized().iter().map(|(l, _)| *l).collect();
        assert_eq!(
            order,
            vec![HurtLocation::Head, HurtLocation::Body, HurtLocation::Feet]
        );
    }

    proptest! {
        #[test]
        fn prop_mirror_is_involutive(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            w in -200.0f32..200.0,
            h in 0.0f32..200.0,
        ) {
            let rect = Rect::new(x, y, w, h);
            prop_assert_eq!(rect.mirrored(Direction::Left).mirrored(Direction::Left), rect);
            prop_assert_eq!(rect.mirrored(Direction::Right), rect);
        }

        #[test]
        fn prop_mirrored_world_boxes_are_symmetric(
            x in -100.0f32..100.0,
            w in 0.0f32..100.0,
            origin in -1000.0f32..1000.0,
        ) {
            let local = Rect::new(x, -50.0, w, 20.0);
            let origin = Vec2::new(origin, 0.0);
            let right = local.to_world(origin, Direction::Right);
            let left = local.to_world(origin, Direction::Left);
            // Reflection across the actor's x keeps the distance of each edge.
            prop_assert!(((right.left() - origin.x) + (left.right() - origin.x)).abs() < 1e-3);
            prop_assert!(((right.right() - origin.x) + (left.left() - origin.x)).abs() < 1e-3);
        }
    }
}
