//! Attack catalog.
//!
//! A static table keyed by attack strength. Definitions are pure data: the
//! collision resolver decides when and to whom they apply.

use brawl_common::{FighterState, Vec2};
use serde::{Deserialize, Serialize};

/// Strength class of an attack; the catalog key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackStrength {
    /// Light punches and kicks.
    Light,
    /// Heavy punch.
    Heavy,
    /// Heavy kick.
    HeavyKick,
    /// Launching hit.
    KnockLift,
    /// Big launcher with stun.
    Knockup,
    /// Spike toward the floor.
    KnockLiftDown,
    /// First super.
    Super1,
    /// Second super.
    Super2,
    /// Bleeding slash.
    Slash,
    /// Chip damage taken while blocking.
    Block,
}

impl AttackStrength {
    /// Every strength.
    pub const ALL: [Self; 10] = [
        Self::Light,
        Self::Heavy,
        Self::HeavyKick,
        Self::KnockLift,
        Self::Knockup,
        Self::KnockLiftDown,
        Self::Super1,
        Self::Super2,
        Self::Slash,
        Self::Block,
    ];

    /// True for light attacks (picks the light hurt reaction).
    #[must_use]
    pub const fn is_light(self) -> bool {
        matches!(self, Self::Light)
    }
}

/// Velocity applied over time after a hit, relative to the actor's facing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Slide {
    /// Initial horizontal velocity (negative moves backward)
    pub velocity: f32,
    /// Deceleration per second
    pub friction: f32,
}

impl Slide {
    /// No slide.
    pub const NONE: Self = Self::new(0.0, 0.0);

    /// Creates a slide.
    #[must_use]
    pub const fn new(velocity: f32, friction: f32) -> Self {
        Self { velocity, friction }
    }
}

/// Status effect tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// Stunned
    Stun,
    /// Burning
    Burn,
    /// Poisoned
    Poison,
    /// Bleeding
    Bleed,
}

/// Timed status effect attached to a victim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    /// Effect tag
    pub kind: StatusKind,
    /// Duration in milliseconds
    pub duration_ms: u32,
}

impl StatusEffect {
    /// Creates a status effect descriptor.
    #[must_use]
    pub const fn new(kind: StatusKind, duration_ms: u32) -> Self {
        Self { kind, duration_ms }
    }
}

/// Effects of one attack strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackDefinition {
    /// Score awarded to the attacker
    pub score: u32,
    /// Skill meter gained by the attacker
    pub skill: u32,
    /// Damage dealt to the victim
    pub damage: f32,
    /// Whether the hit launches the victim
    pub knockup: bool,
    /// Velocity assigned to the victim (x relative to the victim's facing)
    pub thrust: Vec2,
    /// Slide given to the victim
    pub slide: Slide,
    /// Optional status effect
    pub effect: Option<StatusEffect>,
}

const LIGHT: AttackDefinition = AttackDefinition {
    score: 100,
    skill: 5,
    damage: 4.0,
    knockup: false,
    thrust: Vec2::ZERO,
    slide: Slide::new(-10.0 * 60.0, 300.0),
    effect: None,
};

const HEAVY: AttackDefinition = AttackDefinition {
    score: 500,
    skill: 10,
    damage: 8.0,
    knockup: true,
    thrust: Vec2::new(0.0, -300.0),
    slide: Slide::new(-23.0 * 60.0, 500.0),
    effect: None,
};

const KNOCK_LIFT: AttackDefinition = AttackDefinition {
    score: 500,
    skill: 4,
    damage: 8.0,
    knockup: true,
    thrust: Vec2::new(0.0, -480.0),
    slide: Slide::new(-20.0 * 60.0, 500.0),
    effect: None,
};

const KNOCKUP: AttackDefinition = AttackDefinition {
    score: 500,
    skill: 4,
    damage: 25.0,
    knockup: true,
    thrust: Vec2::new(0.0, -400.0),
    slide: Slide::new(0.0, 800.0),
    effect: Some(StatusEffect::new(StatusKind::Stun, 1500)),
};

const KNOCK_LIFT_DOWN: AttackDefinition = AttackDefinition {
    score: 500,
    skill: 4,
    damage: 8.0,
    knockup: true,
    thrust: Vec2::new(0.0, 450.0),
    slide: Slide::new(-30.0 * 60.0, 500.0),
    effect: None,
};

const HEAVY_KICK: AttackDefinition = AttackDefinition {
    score: 500,
    skill: 10,
    damage: 8.0,
    knockup: true,
    thrust: Vec2::ZERO,
    slide: Slide::new(-13.0 * 60.0, 500.0),
    effect: None,
};

const SUPER_1: AttackDefinition = AttackDefinition {
    score: 1000,
    skill: 3,
    damage: 30.0,
    knockup: true,
    thrust: Vec2::new(-500.0, -400.0),
    slide: Slide::new(-16.0 * 60.0, 500.0),
    effect: Some(StatusEffect::new(StatusKind::Stun, 1500)),
};

const SUPER_2: AttackDefinition = AttackDefinition {
    score: 1000,
    skill: 3,
    damage: 7.0,
    knockup: true,
    thrust: Vec2::new(-500.0, -200.0),
    slide: Slide::new(-16.0 * 60.0, 500.0),
    effect: Some(StatusEffect::new(StatusKind::Burn, 1200)),
};

const SLASH: AttackDefinition = AttackDefinition {
    score: 100,
    skill: 3,
    damage: 7.0,
    knockup: true,
    thrust: Vec2::new(-80.0, -200.0),
    slide: Slide::new(-16.0 * 60.0, 300.0),
    effect: Some(StatusEffect::new(StatusKind::Bleed, 1500)),
};

const BLOCK: AttackDefinition = AttackDefinition {
    score: 5,
    skill: 1,
    damage: 1.0,
    knockup: false,
    thrust: Vec2::ZERO,
    slide: Slide::new(-5.0 * 60.0, 20.0),
    effect: None,
};

/// Looks up the definition of an attack strength.
#[must_use]
pub const fn resolve(strength: AttackStrength) -> &'static AttackDefinition {
    match strength {
        AttackStrength::Light => &LIGHT,
        AttackStrength::Heavy => &HEAVY,
        AttackStrength::HeavyKick => &HEAVY_KICK,
        AttackStrength::KnockLift => &KNOCK_LIFT,
        AttackStrength::Knockup => &KNOCKUP,
        AttackStrength::KnockLiftDown => &KNOCK_LIFT_DOWN,
        AttackStrength::Super1 => &SUPER_1,
        AttackStrength::Super2 => &SUPER_2,
        AttackStrength::Slash => &SLASH,
        AttackStrength::Block => &BLOCK,
    }
}

/// Strength of the attack performed in a state, if the state attacks.
#[must_use]
pub const fn attack_for_state(state: FighterState) -> Option<AttackStrength> {
    use FighterState as S;

    let strength = match state {
        S::LightPunch | S::LightKick | S::CrouchLightKick | S::JumpLightKick => {
            AttackStrength::Light
        },
        S::HeavyPunch | S::Headbutt => AttackStrength::Heavy,
        S::HeavyKick | S::CrouchHeavyKick => AttackStrength::HeavyKick,
        S::HeadbuttUp | S::TornadoDig => AttackStrength::KnockLift,
        S::KneeDash => AttackStrength::Knockup,
        S::JumpHeavyKick | S::HeadbuttDown => AttackStrength::KnockLiftDown,
        S::Special1 | S::Hyperskill1 => AttackStrength::Super1,
        S::Special2 | S::Special2RockRelease | S::Hyperskill2 => AttackStrength::Super2,
        S::Special2MoveFighter => AttackStrength::Slash,
        _ => return None,
    };
    Some(strength)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heavy_punch_numbers() {
        let heavy = resolve(AttackStrength::Heavy);
        assert_eq!(heavy.damage, 8.0);
        assert_eq!(heavy.thrust, Vec2::new(0.0, -300.0));
        assert!(heavy.knockup);
        assert_eq!(heavy.slide, Slide::new(-1380.0, 500.0));
        assert_eq!(heavy.score, 500);
    }

    #[test]
    fn test_effects() {
        assert_eq!(resolve(AttackStrength::Light).effect, None);
        assert_eq!(
            resolve(AttackStrength::Knockup).effect,
            Some(StatusEffect::new(StatusKind::Stun, 1500))
        );
        assert_eq!(
            resolve(AttackStrength::Super2).effect,
            Some(StatusEffect::new(StatusKind::Burn, 1200))
        );
        assert_eq!(
            resolve(AttackStrength::Slash).effect,
            Some(StatusEffect::new(StatusKind::Bleed, 1500))
        );
    }

    #[test]
    fn test_block_defaults_missing_fields() {
        let block = resolve(AttackStrength::Block);
        assert!(!block.knockup);
        assert_eq!(block.thrust, Vec2::ZERO);
        assert_eq!(block.damage, 1.0);
    }

    #[test]
    fn test_only_light_is_light() {
        let light: Vec<_> = AttackStrength::ALL
            .into_iter()
            .filter(|s| s.is_light())
            .collect();
        assert_eq!(light, vec![AttackStrength::Light]);
        // Only light and block attacks leave the victim grounded.
        for strength in AttackStrength::ALL {
            let grounded = matches!(strength, AttackStrength::Light | AttackStrength::Block);
            assert_eq!(resolve(strength).knockup, !grounded, "{strength:?}");
        }
    }

    #[test]
    fn test_attack_for_state() {
        assert_eq!(
            attack_for_state(FighterState::HeavyPunch),
            Some(AttackStrength::Heavy)
        );
        assert_eq!(
            attack_for_state(FighterState::LightKick),
            Some(AttackStrength::Light)
        );
        assert_eq!(attack_for_state(FighterState::Idle), None);
        assert_eq!(attack_for_state(FighterState::Block), None);
    }
}
