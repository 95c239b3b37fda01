//! Vector and facing types shared by geometry, physics, and the camera.
//!
//! World space follows screen convention: X grows to the right and Y grows
//! downward, so jumping means a negative vertical velocity.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

/// 2D vector for positions and velocities.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vec2 {
    /// Zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new Vec2.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the length (magnitude) of the vector.
    #[must_use]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Horizontal facing of a combatant.
///
/// The numeric sign is what every mirroring computation multiplies by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Facing toward negative X (sign −1).
    Left,
    /// Facing toward positive X (sign +1).
    #[default]
    Right,
}

impl Direction {
    /// Returns the mirroring sign: −1.0 for left, +1.0 for right.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Returns the opposite facing.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Facing that looks from `from_x` toward `to_x`.
    ///
    /// Keeps `self` when both are at the same X.
    #[must_use]
    pub fn toward(self, from_x: f32, to_x: f32) -> Self {
        if to_x > from_x {
            Self::Right
        } else if to_x < from_x {
            Self::Left
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_ops() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -4.0);
        assert_eq!(a + b, Vec2::new(4.0, -2.0));
        assert_eq!(b - a, Vec2::new(2.0, -6.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert!((Vec2::new(3.0, 4.0).length() - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_direction_toward() {
        assert_eq!(Direction::Left.toward(0.0, 10.0), Direction::Right);
        assert_eq!(Direction::Right.toward(10.0, 0.0), Direction::Left);
        assert_eq!(Direction::Left.toward(5.0, 5.0), Direction::Left);
    }
}
