//! Combatant record.
//!
//! Plain mutable state of one fighter. The state machine, the collision
//! resolver and physics all write to it; nothing here enforces rules.

use brawl_common::{CombatantId, Direction, FighterId, FighterState, Vec2};
use serde::{Deserialize, Serialize};

use crate::attacks::{Slide, StatusEffect, StatusKind};

/// Default starting health.
pub const DEFAULT_HEALTH: f32 = 100.0;

/// Status effect currently attached to a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveStatus {
    /// Effect tag
    pub kind: StatusKind,
    /// Remaining time in milliseconds
    pub remaining_ms: f32,
}

impl From<StatusEffect> for ActiveStatus {
    fn from(effect: StatusEffect) -> Self {
        Self {
            kind: effect.kind,
            remaining_ms: effect.duration_ms as f32,
        }
    }
}

/// One fighter in a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    /// Unique id
    pub id: CombatantId,
    /// Character played
    pub fighter: FighterId,
    /// Current state
    pub state: FighterState,
    /// Facing
    pub direction: Direction,
    /// World position of the actor origin (feet)
    pub position: Vec2,
    /// Velocity in pixels per second
    pub velocity: Vec2,
    /// Slide currently decaying on this combatant
    pub slide: Slide,
    /// Frame index in the current animation
    pub frame_index: usize,
    /// Milliseconds spent on the current frame
    pub frame_elapsed_ms: f32,
    /// Incremented on every state entry; one attack activation per value
    pub activation: u32,
    /// Remaining health
    pub health: f32,
    /// Maximum health
    pub max_health: f32,
    /// Accumulated score
    pub score: u32,
    /// Skill meter
    pub skill: u32,
    /// Attached status effect
    pub status: Option<ActiveStatus>,
}

impl Combatant {
    /// Creates an idle combatant at a position.
    #[must_use]
    pub fn new(fighter: FighterId, position: Vec2, direction: Direction) -> Self {
        Self {
            id: CombatantId::new(),
            fighter,
            state: FighterState::Idle,
            direction,
            position,
            velocity: Vec2::ZERO,
            slide: Slide::NONE,
            frame_index: 0,
            frame_elapsed_ms: 0.0,
            activation: 0,
            health: DEFAULT_HEALTH,
            max_health: DEFAULT_HEALTH,
            score: 0,
            skill: 0,
            status: None,
        }
    }

    /// Sets starting health.
    #[must_use]
    pub fn with_health(mut self, health: f32) -> Self {
        self.health = health.max(0.0);
        self.max_health = self.health;
        self
    }

    /// True once health has run out.
    #[must_use]
    pub fn is_knocked_out(&self) -> bool {
        self.health <= 0.0
    }

    /// Health as a fraction of max.
    #[must_use]
    pub fn health_percent(&self) -> f32 {
        if self.max_health <= 0.0 {
            0.0
        } else {
            (self.health / self.max_health).clamp(0.0, 1.0)
        }
    }

    /// Removes health, never going below zero. Returns the damage dealt.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let dealt = amount.max(0.0).min(self.health);
        self.health -= dealt;
        dealt
    }

    /// Attaches a status effect, replacing any current one.
    pub fn attach_status(&mut self, effect: StatusEffect) {
        self.status = Some(effect.into());
    }

    /// Counts the status effect down, dropping it when it expires.
    pub fn tick_status(&mut self, seconds_passed: f32) {
        if let Some(status) = &mut self.status {
            status.remaining_ms -= seconds_passed * 1000.0;
            if status.remaining_ms <= 0.0 {
                self.status = None;
            }
        }
    }

    /// True while a status of `kind` is attached.
    #[must_use]
    pub fn has_status(&self, kind: StatusKind) -> bool {
        self.status.is_some_and(|s| s.kind == kind)
    }
}
