//! Combatant physics integration.
//!
//! Each tick: decaying slide, velocity integration, gravity while airborne,
//! floor contact, and horizontal clamping to the stage.

use brawl_common::FighterState;
use brawl_kernel::StageBounds;
use serde::{Deserialize, Serialize};

use crate::combatant::Combatant;

/// Deceleration applied to combatants pressing into each other (px/s).
pub const PUSH_FRICTION: f32 = 66.0;

/// Movement tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Forward walk speed
    pub walk_forward_speed: f32,
    /// Backward walk speed
    pub walk_backward_speed: f32,
    /// Upward speed at jump start
    pub jump_velocity: f32,
    /// Horizontal speed of directional jumps
    pub jump_horizontal_speed: f32,
    /// Dash speed
    pub dash_speed: f32,
    /// Dodge speed
    pub dodge_speed: f32,
    /// Gravity while airborne
    pub gravity: f32,
    /// Push-box deceleration
    pub push_friction: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            walk_forward_speed: 3.0 * 60.0,
            walk_backward_speed: 2.5 * 60.0,
            jump_velocity: 420.0,
            jump_horizontal_speed: 170.0,
            dash_speed: 300.0,
            dodge_speed: 240.0,
            gravity: 1000.0,
            push_friction: PUSH_FRICTION,
        }
    }
}

/// Moves `value` toward zero by `amount` without crossing it.
#[must_use]
pub fn decay_toward_zero(value: f32, amount: f32) -> f32 {
    let amount = amount.max(0.0);
    if value > 0.0 {
        (value - amount).max(0.0)
    } else if value < 0.0 {
        (value + amount).min(0.0)
    } else {
        0.0
    }
}

/// True when standing on the floor and not moving upward.
#[must_use]
pub fn is_grounded(combatant: &Combatant, stage: &StageBounds) -> bool {
    combatant.position.y >= stage.floor && combatant.velocity.y >= 0.0
}

/// Sets the velocity a state starts with.
///
/// Airborne attacks keep their momentum; grounded states without their own
/// motion stop horizontally.
pub fn apply_entry_motion(combatant: &mut Combatant, tuning: &PhysicsTuning, stage: &StageBounds) {
    use FighterState as S;

    let dir = combatant.direction.sign();
    let velocity = &mut combatant.velocity;
    match combatant.state {
        S::WalkForward => velocity.x = tuning.walk_forward_speed * dir,
        S::WalkBackward => velocity.x = -tuning.walk_backward_speed * dir,
        S::JumpUp => {
            velocity.x = 0.0;
            velocity.y = -tuning.jump_velocity;
        },
        S::JumpForward => {
            velocity.x = tuning.jump_horizontal_speed * dir;
            velocity.y = -tuning.jump_velocity;
        },
        S::JumpBackward => {
            velocity.x = -tuning.jump_horizontal_speed * dir;
            velocity.y = -tuning.jump_velocity;
        },
        S::DashForward | S::KneeDash | S::Special2MoveFighter => {
            velocity.x = tuning.dash_speed * dir;
        },
        S::DashBackward => velocity.x = -tuning.dash_speed * dir,
        S::DodgeForward => velocity.x = tuning.dodge_speed * dir,
        S::DodgeBackward => velocity.x = -tuning.dodge_speed * dir,
        S::JumpLightKick | S::JumpHeavyKick => {},
        _ => {
            if combatant.position.y >= stage.floor {
                velocity.x = 0.0;
            }
        },
    }
}

/// Advances one combatant by `seconds_passed`.
///
/// Returns true when the combatant ends the step standing on the floor.
pub fn integrate(
    combatant: &mut Combatant,
    seconds_passed: f32,
    tuning: &PhysicsTuning,
    stage: &StageBounds,
) -> bool {
    let dt = seconds_passed.max(0.0);
    let dir = combatant.direction.sign();

    if combatant.slide.velocity != 0.0 {
        combatant.position.x += combatant.slide.velocity * dir * dt;
        combatant.slide.velocity =
            decay_toward_zero(combatant.slide.velocity, combatant.slide.friction * dt);
    }

    let airborne = !is_grounded(combatant, stage);
    combatant.position += combatant.velocity * dt;
    if airborne {
        combatant.velocity.y += tuning.gravity * dt;
    }

    let on_floor = combatant.position.y >= stage.floor;
    if on_floor {
        combatant.position.y = stage.floor;
        if combatant.velocity.y > 0.0 {
            combatant.velocity.y = 0.0;
        }
    }

    combatant.position.x = stage.clamp_x(combatant.position.x);
    on_floor && combatant.velocity.y >= 0.0
}

/// Slows horizontal velocity that points toward `toward_x`.
pub fn apply_push_friction(combatant: &mut Combatant, toward_x: f32, friction: f32, seconds_passed: f32) {
    let toward = (toward_x - combatant.position.x).signum();
    if combatant.velocity.x * toward > 0.0 {
        combatant.velocity.x = decay_toward_zero(combatant.velocity.x, friction * seconds_passed);
    }
}
