//! Two-fighter stage camera.
//!
//! The camera position is the world coordinate of the viewport's top-left
//! corner. Each update re-derives it from both combatants: vertical follows the
//! higher fighter, horizontal either centers on a wide pair or scrolls only when
//! a fighter enters the dead zone near a viewport edge. The result is clamped
//! to the stage, and an optional decaying shake is added on top of the clamped
//! position.

use brawl_common::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::geometry::Rect;
use crate::stage::StageBounds;

/// Default shake intensity in pixels.
pub const DEFAULT_SHAKE_INTENSITY: f32 = 4.0;

/// Default shake duration in seconds.
pub const DEFAULT_SHAKE_DURATION: f32 = 0.15;

/// Seed used when none is supplied.
pub const DEFAULT_SHAKE_SEED: u64 = 0x5EED_CA3E;

/// Size of the rendering surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl Viewport {
    /// Creates a viewport size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(384.0, 224.0)
    }
}

/// Decaying random camera shake.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Shake {
    /// Peak offset in pixels
    pub intensity: f32,
    /// Total duration in seconds
    pub duration: f32,
    /// Remaining time in seconds
    pub remaining: f32,
}

impl Shake {
    /// True while the shake still has time left.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Current maximum offset: `intensity * max(0, remaining / duration)`.
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        self.intensity * (self.remaining / self.duration).max(0.0)
    }
}

/// 2D stage camera.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Position including shake jitter (what the renderer uses).
    pub position: Vec2,
    /// Clamped position before shake.
    settled: Vec2,
    stage: StageBounds,
    shake: Shake,
    rng: fastrand::Rng,
}

impl Camera {
    /// Creates a camera at a world position for a stage.
    #[must_use]
    pub fn new(x: f32, y: f32, stage: StageBounds) -> Self {
        let position = Vec2::new(x, y);
        Self {
            position,
            settled: position,
            stage,
            shake: Shake::default(),
            rng: fastrand::Rng::with_seed(DEFAULT_SHAKE_SEED),
        }
    }

    /// Creates a camera horizontally centered on the stage.
    #[must_use]
    pub fn centered(stage: StageBounds, viewport: Viewport) -> Self {
        let (min_x, max_x) = stage.camera_x_range(viewport.width);
        let x = (stage.mid_x() - viewport.width / 2.0).clamp(min_x, max_x);
        Self::new(x, 0.0, stage)
    }

    /// Reseeds the shake jitter generator.
    pub fn reseed(&mut self, seed: u64) {
        self.rng.seed(seed);
    }

    /// Stage this camera is bound to.
    #[must_use]
    pub fn stage(&self) -> &StageBounds {
        &self.stage
    }

    /// Current shake state.
    #[must_use]
    pub fn shake_state(&self) -> Shake {
        self.shake
    }

    /// Position after clamping, without shake jitter.
    #[must_use]
    pub fn unshaken_position(&self) -> Vec2 {
        self.settled
    }

    /// Starts a shake, replacing any shake in progress.
    pub fn shake(&mut self, intensity: f32, duration: f32) {
        self.shake = Shake {
            intensity,
            duration,
            remaining: duration,
        };
    }

    /// Repositions the camera for this tick.
    ///
    /// A viewport larger than the stage pins the camera to the stage's
    /// top-left corner (`padding`, 0) instead of its far edge.
    pub fn update(&mut self, seconds_passed: f32, viewport: Viewport, fighters: [Vec2; 2]) {
        let [a, b] = fighters;
        let boundary = self.stage.scroll_boundary;

        let mut x = self.settled.x;
        let y = -6.0 + (a.y.min(b.y) / 10.0).floor();

        let low_x = a.x.min(b.x);
        let high_x = a.x.max(b.x);
        if high_x - low_x > viewport.width - boundary * 2.0 {
            let mid_point = (high_x - low_x) / 2.0;
            x = low_x + mid_point - viewport.width / 2.0;
        } else {
            for fighter in fighters {
                if fighter.x < x + boundary {
                    x = fighter.x - boundary;
                } else if fighter.x > x + viewport.width - boundary {
                    x = fighter.x - viewport.width + boundary;
                }
            }
        }

        let (min_x, max_x) = self.stage.camera_x_range(viewport.width);
        let (min_y, max_y) = self.stage.camera_y_range(viewport.height);
        self.settled = Vec2::new(x.clamp(min_x, max_x), y.clamp(min_y, max_y));
        self.position = self.settled;

        if self.shake.is_active() {
            self.shake.remaining -= seconds_passed.max(0.0);
            let magnitude = self.shake.magnitude();
            let offset = Vec2::new(self.jitter(magnitude), self.jitter(magnitude));
            self.position += offset;
            trace!(magnitude, ?offset, "Camera shake");
            if self.shake.remaining <= 0.0 {
                self.shake = Shake::default();
            }
        }
    }

    /// Uniform random offset in `[-magnitude, magnitude]`.
    fn jitter(&mut self, magnitude: f32) -> f32 {
        (self.rng.f32() * 2.0 - 1.0) * magnitude
    }

    /// Converts a world point into camera space.
    #[must_use]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.position
    }

    /// Converts a camera-space point back into world space.
    #[must_use]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.position
    }

    /// World rectangle currently covered by the viewport.
    #[must_use]
    pub fn visible_bounds(&self, viewport: Viewport) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            viewport.width,
            viewport.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VIEWPORT: Viewport = Viewport::new(384.0, 224.0);

    fn camera() -> Camera {
        Camera::new(200.0, 0.0, StageBounds::default())
    }

    #[test]
    fn test_vertical_follows_highest_fighter() {
        let mut camera = camera();
        // min y 220 -> -6 + 22 = 16, inside [0, 24].
        camera.update(0.016, VIEWPORT, [Vec2::new(300.0, 220.0), Vec2::new(400.0, 230.0)]);
        assert_eq!(camera.position.y, 16.0);

        // A jumping fighter pulls the camera up, clamped at 0.
        camera.update(0.016, VIEWPORT, [Vec2::new(300.0, 40.0), Vec2::new(400.0, 220.0)]);
        assert_eq!(camera.position.y, 0.0);
    }

    #[test]
    fn test_wide_pair_is_centered() {
        let mut camera = camera();
        // Span 250 > 384 - 200 = 184.
        camera.update(0.016, VIEWPORT, [Vec2::new(300.0, 220.0), Vec2::new(550.0, 220.0)]);
        assert_eq!(camera.position.x, 300.0 + 125.0 - 192.0);
    }

    #[test]
    fn test_dead_zone_scrolling() {
        let mut camera = camera();
        // Both fighters comfortably inside [300, 484]: camera stays.
        camera.update(0.016, VIEWPORT, [Vec2::new(320.0, 220.0), Vec2::new(420.0, 220.0)]);
        assert_eq!(camera.position.x, 200.0);

        // Right fighter crosses 200 + 384 - 100 = 484: shift just enough.
        camera.update(0.016, VIEWPORT, [Vec2::new(340.0, 220.0), Vec2::new(500.0, 220.0)]);
        assert_eq!(camera.position.x, 216.0);

        // Left fighter crosses 216 + 100: shift back left.
        camera.update(0.016, VIEWPORT, [Vec2::new(300.0, 220.0), Vec2::new(420.0, 220.0)]);
        assert_eq!(camera.position.x, 200.0);
    }

    #[test]
    fn test_clamped_to_stage() {
        let mut camera = camera();
        camera.update(0.016, VIEWPORT, [Vec2::new(0.0, 220.0), Vec2::new(40.0, 220.0)]);
        assert_eq!(camera.position.x, 32.0);

        camera.update(0.016, VIEWPORT, [Vec2::new(790.0, 220.0), Vec2::new(796.0, 220.0)]);
        assert_eq!(camera.position.x, 412.0);
    }

    #[test]
    fn test_oversized_viewport_pins_top_left() {
        let mut camera = camera();
        let wide = Viewport::new(2000.0, 600.0);
        camera.update(0.016, wide, [Vec2::new(790.0, 220.0), Vec2::new(796.0, 220.0)]);
        assert_eq!(camera.position, Vec2::new(32.0, 0.0));
    }

    #[test]
    fn test_shake_decays_and_resets() {
        let mut camera = camera();
        let fighters = [Vec2::new(320.0, 220.0), Vec2::new(420.0, 220.0)];
        camera.shake(4.0, 0.15);

        let mut last = f32::INFINITY;
        for _ in 0..20 {
            camera.update(0.01, VIEWPORT, fighters);
            let settled = camera.unshaken_position();
            let magnitude = camera.shake_state().magnitude();
            assert!(magnitude <= last);
            last = magnitude;
            // Jitter never exceeds the magnitude before this tick's decay.
            assert!((camera.position.x - settled.x).abs() <= 4.0);
        }

        assert!(!camera.shake_state().is_active());
        assert_eq!(camera.shake_state().magnitude(), 0.0);
        camera.update(0.01, VIEWPORT, fighters);
        assert_eq!(camera.position, camera.unshaken_position());
    }

    #[test]
    fn test_shake_overwrites() {
        let mut camera = camera();
        camera.shake(10.0, 1.0);
        camera.update(0.5, VIEWPORT, [Vec2::new(320.0, 220.0), Vec2::new(420.0, 220.0)]);
        camera.shake(2.0, 0.2);
        assert_eq!(
            camera.shake_state(),
            Shake {
                intensity: 2.0,
                duration: 0.2,
                remaining: 0.2
            }
        );
    }

    #[test]
    fn test_shake_is_reproducible_with_seed() {
        let fighters = [Vec2::new(320.0, 220.0), Vec2::new(420.0, 220.0)];
        let mut a = camera();
        let mut b = camera();
        a.reseed(7);
        b.reseed(7);
        a.shake(4.0, 1.0);
        b.shake(4.0, 1.0);
        for _ in 0..5 {
            a.update(0.05, VIEWPORT, fighters);
            b.update(0.05, VIEWPORT, fighters);
            assert_eq!(a.position, b.position);
        }
    }

    #[test]
    fn test_world_screen_round_trip() {
        let camera = camera();
        let world = Vec2::new(310.0, 180.0);
        let screen = camera.world_to_screen(world);
        assert_eq!(screen, Vec2::new(110.0, 180.0));
        assert_eq!(camera.screen_to_world(screen), world);
    }

    proptest! {
        #[test]
        fn prop_unshaken_position_within_stage(
            ax in -500.0f32..1500.0,
            ay in -500.0f32..500.0,
            bx in -500.0f32..1500.0,
            by in -500.0f32..500.0,
            start in -500.0f32..1500.0,
            width in 100.0f32..700.0,
            height in 100.0f32..240.0,
            shaking in proptest::bool::ANY,
        ) {
            let stage = StageBounds::default();
            let viewport = Viewport::new(width, height);
            let mut camera = Camera::new(start, 0.0, stage);
            if shaking {
                camera.shake(20.0, 1.0);
            }
            camera.update(0.016, viewport, [Vec2::new(ax, ay), Vec2::new(bx, by)]);
            let settled = camera.unshaken_position();
            prop_assert!(settled.x >= stage.padding);
            prop_assert!(settled.x <= stage.width + stage.padding - width);
            prop_assert!(settled.y >= 0.0);
            prop_assert!(settled.y <= stage.height - height);
        }
    }
}
