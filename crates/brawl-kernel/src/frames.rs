//! Frame geometry table: per-state animations and per-frame boxes.
//!
//! Frame records are keyed by a frame id string and shared between
//! animations. Each animation is an ordered list of steps, every step naming a
//! frame record and how long to hold it.
//!
//! Lookups are forgiving. A step that names a missing frame, or an index past
//! the end of an animation, yields [`FrameBoxes::ZERO`] so hand-authored data
//! that is still incomplete never stops the simulation. Only a state without
//! any animation is reported, as [`BrawlError::AssetMissing`].

use std::collections::HashMap;

use brawl_common::{BrawlError, BrawlResult, FighterState, Vec2};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::geometry::{FrameBoxes, HurtBoxes, Rect};

/// How long an animation step is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum FrameHold {
    /// Hold for this many milliseconds.
    Millis(u32),
    /// Never advance on time; something else must move the animation on.
    Freeze,
    /// Instant transition marker: the animation is finished on arrival.
    Transition,
}

impl FrameHold {
    /// Authored value meaning [`FrameHold::Freeze`].
    pub const FREEZE: i32 = 0;
    /// Authored value meaning [`FrameHold::Transition`].
    pub const TRANSITION: i32 = -1;
}

impl From<i32> for FrameHold {
    fn from(value: i32) -> Self {
        match value {
            0 => Self::Freeze,
            v if v < 0 => Self::Transition,
            v => Self::Millis(v.unsigned_abs()),
        }
    }
}

impl From<FrameHold> for i32 {
    fn from(hold: FrameHold) -> Self {
        match hold {
            FrameHold::Millis(ms) => i32::try_from(ms).unwrap_or(i32::MAX),
            FrameHold::Freeze => FrameHold::FREEZE,
            FrameHold::Transition => FrameHold::TRANSITION,
        }
    }
}

/// Region of the sprite sheet drawn for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "(Rect, [f32; 2])", into = "(Rect, [f32; 2])")]
pub struct SpriteRegion {
    /// Source rectangle on the sheet
    pub source: Rect,
    /// Draw origin inside the source rectangle (the actor's feet)
    pub origin: Vec2,
}

impl From<(Rect, [f32; 2])> for SpriteRegion {
    fn from((source, [ox, oy]): (Rect, [f32; 2])) -> Self {
        let origin = |v: f32| if v.is_finite() { v } else { 0.0 };
        Self {
            source,
            origin: Vec2::new(origin(ox), origin(oy)),
        }
    }
}

impl From<SpriteRegion> for (Rect, [f32; 2]) {
    fn from(region: SpriteRegion) -> Self {
        (region.source, [region.origin.x, region.origin.y])
    }
}

/// One authored frame: sprite region plus all collision boxes.
///
/// Authored as the positional tuple `(sprite, push, [head, body, feet], hit)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    from = "(SpriteRegion, Rect, HurtBoxes, Rect)",
    into = "(SpriteRegion, Rect, HurtBoxes, Rect)"
)]
pub struct FrameRecord {
    /// Sprite sheet region
    pub sprite: SpriteRegion,
    /// Collision boxes in actor-local space
    pub boxes: FrameBoxes,
}

impl FrameRecord {
    /// Creates a frame record.
    #[must_use]
    pub const fn new(sprite: SpriteRegion, push: Rect, hurt: HurtBoxes, hit: Rect) -> Self {
        Self {
            sprite,
            boxes: FrameBoxes { push, hurt, hit },
        }
    }
}

impl From<(SpriteRegion, Rect, HurtBoxes, Rect)> for FrameRecord {
    fn from((sprite, push, hurt, hit): (SpriteRegion, Rect, HurtBoxes, Rect)) -> Self {
        Self::new(sprite, push, hurt, hit)
    }
}

impl From<FrameRecord> for (SpriteRegion, Rect, HurtBoxes, Rect) {
    fn from(record: FrameRecord) -> Self {
        (
            record.sprite,
            record.boxes.push,
            record.boxes.hurt,
            record.boxes.hit,
        )
    }
}

/// One step of an animation, authored as `(frame_key, hold)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, i32)", into = "(String, i32)")]
pub struct AnimationStep {
    /// Key of the frame record shown during this step
    pub frame: String,
    /// Hold duration
    pub hold: FrameHold,
}

impl AnimationStep {
    /// Creates an animation step.
    #[must_use]
    pub fn new(frame: impl Into<String>, hold: FrameHold) -> Self {
        Self {
            frame: frame.into(),
            hold,
        }
    }
}

impl From<(String, i32)> for AnimationStep {
    fn from((frame, hold): (String, i32)) -> Self {
        Self::new(frame, hold.into())
    }
}

impl From<AnimationStep> for (String, i32) {
    fn from(step: AnimationStep) -> Self {
        (step.frame, step.hold.into())
    }
}

/// Ordered frame sequence of one state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Animation {
    steps: Vec<AnimationStep>,
}

impl Animation {
    /// Creates an animation from its steps.
    #[must_use]
    pub fn new(steps: Vec<AnimationStep>) -> Self {
        Self { steps }
    }

    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if the animation has no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step at a frame index.
    #[must_use]
    pub fn step(&self, index: usize) -> Option<&AnimationStep> {
        self.steps.get(index)
    }

    /// Iterates over the steps.
    pub fn steps(&self) -> impl Iterator<Item = &AnimationStep> {
        self.steps.iter()
    }
}

/// Authored on-disk shape, keyed by plain strings.
#[derive(Debug, Deserialize)]
struct AuthoredTable {
    frames: HashMap<String, FrameRecord>,
    animations: HashMap<String, Animation>,
}

/// Animation and box data for one character.
#[derive(Debug, Clone, Default)]
pub struct FrameGeometryTable {
    frames: HashMap<String, FrameRecord>,
    animations: HashMap<FighterState, Animation>,
}

impl FrameGeometryTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an authored RON table.
    ///
    /// ```text
    /// (
    ///     frames: { "idle-1": (((75.0, 14.0, 60.0, 89.0), (34.0, 86.0)), ...) },
    ///     animations: { "idle": [("idle-1", 68)] },
    /// )
    /// ```
    pub fn from_ron_str(source: &str) -> BrawlResult<Self> {
        let authored: AuthoredTable =
            ron::from_str(source).map_err(|e| BrawlError::FrameData(e.to_string()))?;

        let mut table = Self::new();
        for (key, record) in authored.frames {
            table.insert_frame(key, record);
        }
        for (name, animation) in authored.animations {
            let state = name
                .parse::<FighterState>()
                .map_err(|e| BrawlError::FrameData(e.to_string()))?;
            table.insert_animation(state, animation);
        }
        debug!(
            frames = table.frames.len(),
            animations = table.animations.len(),
            "Loaded frame geometry table"
        );
        Ok(table)
    }

    /// Adds or replaces a frame record.
    pub fn insert_frame(&mut self, key: impl Into<String>, record: FrameRecord) {
        self.frames.insert(key.into(), record);
    }

    /// Adds or replaces the animation of a state.
    pub fn insert_animation(&mut self, state: FighterState, animation: Animation) {
        self.animations.insert(state, animation);
    }

    /// Looks up a frame record by key.
    #[must_use]
    pub fn frame(&self, key: &str) -> Option<&FrameRecord> {
        self.frames.get(key)
    }

    /// Number of frame records.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if the state has a non-empty animation.
    #[must_use]
    pub fn has_animation(&self, state: FighterState) -> bool {
        self.animations.get(&state).is_some_and(|a| !a.is_empty())
    }

    /// The animation of a state.
    ///
    /// A state with no animation (or an empty one) is a setup error.
    pub fn animation(&self, state: FighterState) -> BrawlResult<&Animation> {
        self.animations
            .get(&state)
            .filter(|a| !a.is_empty())
            .ok_or(BrawlError::AssetMissing { state })
    }

    /// Frame record shown at `frame_index` of a state, if authored.
    #[must_use]
    pub fn record_for(&self, state: FighterState, frame_index: usize) -> Option<&FrameRecord> {
        let step = self.animations.get(&state)?.step(frame_index)?;
        self.frames.get(&step.frame)
    }

    /// Local boxes at `frame_index` of a state; all zero when anything is missing.
    #[must_use]
    pub fn boxes_for(&self, state: FighterState, frame_index: usize) -> FrameBoxes {
        if let Some(record) = self.record_for(state, frame_index) {
            record.boxes
        } else {
            trace!(%state, frame_index, "No frame data, using empty boxes");
            FrameBoxes::ZERO
        }
    }

    /// Animation steps whose frame key has no record, as `(state, key)`.
    #[must_use]
    pub fn missing_frames(&self) -> Vec<(FighterState, String)> {
        let mut missing: Vec<_> = self
            .animations
            .iter()
            .flat_map(|(state, animation)| {
                animation
                    .steps()
                    .filter(|step| !self.frames.contains_key(&step.frame))
                    .map(|step| (*state, step.frame.clone()))
            })
            .collect();
        missing.sort();
        missing.dedup();
        missing
    }

    /// States with no animation at all.
    #[must_use]
    pub fn states_without_animation(&self) -> Vec<FighterState> {
        FighterState::ALL
            .into_iter()
            .filter(|s| !self.has_animation(*s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn punch_record() -> FrameRecord {
        FrameRecord::new(
            SpriteRegion {
                source: Rect::new(0.0, 0.0, 64.0, 96.0),
                origin: Vec2::new(32.0, 90.0),
            },
            Rect::new(-16.0, -80.0, 32.0, 78.0),
            HurtBoxes::new(
                Rect::new(11.0, -94.0, 24.0, 18.0),
                Rect::new(-7.0, -77.0, 40.0, 43.0),
                Rect::new(-7.0, -33.0, 40.0, 33.0),
            ),
            Rect::new(3.0, -70.0, 50.0, 18.0),
        )
    }

    fn table() -> FrameGeometryTable {
        let mut table = FrameGeometryTable::new();
        table.insert_frame("punch-1", punch_record());
        table.insert_animation(
            FighterState::LightPunch,
            Animation::new(vec![
                AnimationStep::new("punch-1", FrameHold::Millis(50)),
                AnimationStep::new("punch-missing", FrameHold::Transition),
            ]),
        );
        table
    }

    #[test]
    fn test_frame_hold_from_authored() {
        assert_eq!(FrameHold::from(0), FrameHold::Freeze);
        assert_eq!(FrameHold::from(-1), FrameHold::Transition);
        assert_eq!(FrameHold::from(-7), FrameHold::Transition);
        assert_eq!(FrameHold::from(120), FrameHold::Millis(120));
        assert_eq!(i32::from(FrameHold::Transition), -1);
    }

    #[test]
    fn test_boxes_for_known_frame() {
        let table = table();
        let boxes = table.boxes_for(FighterState::LightPunch, 0);
        assert_eq!(boxes.hit, Rect::new(3.0, -70.0, 50.0, 18.0));
        assert_eq!(boxes.push, Rect::new(-16.0, -80.0, 32.0, 78.0));
    }

    #[test]
    fn test_boxes_for_missing_data_is_zero() {
        let table = table();
        // Step exists but names a missing frame.
        assert_eq!(table.boxes_for(FighterState::LightPunch, 1), FrameBoxes::ZERO);
        // Index past the end.
        assert_eq!(table.boxes_for(FighterState::LightPunch, 9), FrameBoxes::ZERO);
        // State without animation.
        assert_eq!(table.boxes_for(FighterState::Idle, 0), FrameBoxes::ZERO);
    }

    #[test]
    fn test_animation_missing_is_error() {
        let table = table();
        assert_eq!(table.animation(FighterState::LightPunch).map(Animation::len).ok(), Some(2));

        let err = table.animation(FighterState::Idle).unwrap_err();
        assert!(matches!(
            err,
            BrawlError::AssetMissing {
                state: FighterState::Idle
            }
        ));

        let mut table = table;
        table.insert_animation(FighterState::Crouch, Animation::default());
        assert!(table.animation(FighterState::Crouch).is_err());
    }

    #[test]
    fn test_missing_frames_report() {
        let table = table();
        assert_eq!(
            table.missing_frames(),
            vec![(FighterState::LightPunch, "punch-missing".to_string())]
        );
        assert!(table
            .states_without_animation()
            .contains(&FighterState::Idle));
        assert!(!table
            .states_without_animation()
            .contains(&FighterState::LightPunch));
    }

    #[test]
    fn test_from_ron_str() {
        let source = r#"(
            frames: {
                "idle-1": (
                    ((75.0, 14.0, 60.0, 89.0), (34.0, 86.0)),
                    (-16.0, -80.0, 32.0, 78.0),
                    ((-8.0, -88.0, 24.0, 16.0), (-26.0, -74.0, 48.0, 42.0), (-26.0, -31.0, 45.0, 32.0)),
                    (0.0, 0.0, 0.0, 0.0),
                ),
            },
            animations: {
                "idle": [("idle-1", 68), ("idle-1", -1)],
            },
        )"#;

        let table = FrameGeometryTable::from_ron_str(source).expect("valid table");
        let animation = table.animation(FighterState::Idle).expect("idle animation");
        assert_eq!(animation.len(), 2);
        assert_eq!(animation.step(1).map(|s| s.hold), Some(FrameHold::Transition));

        let record = table.frame("idle-1").expect("idle frame");
        assert_eq!(record.sprite.origin, Vec2::new(34.0, 86.0));
        assert_eq!(record.boxes.hurt.feet, Rect::new(-26.0, -31.0, 45.0, 32.0));
        assert!(record.boxes.hit.is_empty());
    }

    #[test]
    fn test_from_ron_str_rejects_unknown_state() {
        let source = r#"(frames: {}, animations: { "moonwalk": [] })"#;
        let err = FrameGeometryTable::from_ron_str(source).unwrap_err();
        assert!(matches!(err, BrawlError::FrameData(_)));
    }

    #[test]
    fn test_from_ron_str_rejects_garbage() {
        let err = FrameGeometryTable::from_ron_str("not ron").unwrap_err();
        assert!(matches!(err, BrawlError::FrameData(_)));
    }
}
