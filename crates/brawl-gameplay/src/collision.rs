//! Collision resolution between the two combatants.
//!
//! Hits are detected against a snapshot taken before any effect is applied,
//! so a trade resolves both sides even though the first hit already moved
//! its victim into a hurt state. Each attack activation lands at most once.

use std::collections::HashMap;

use brawl_common::{CombatantId, FighterState, Vec2};
use brawl_kernel::{FrameGeometryTable, HurtLocation, Rect, StageBounds};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::attacks::{attack_for_state, resolve, AttackStrength};
use crate::combatant::Combatant;
use crate::physics::{self, PhysicsTuning};
use crate::state_machine::StateMachine;

/// Combat rule tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Upper bound of the skill meter
    pub max_skill: u32,
    /// Starting health of each combatant
    pub starting_health: f32,
    /// Whether facing blockers take chip damage instead of the full hit
    pub blocking: bool,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            max_skill: 100,
            starting_health: crate::combatant::DEFAULT_HEALTH,
            blocking: true,
        }
    }
}

/// One landed hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitEvent {
    /// Attacking combatant
    pub attacker: CombatantId,
    /// Struck combatant
    pub defender: CombatantId,
    /// Strength of the attack
    pub strength: AttackStrength,
    /// Hurt box that was struck
    pub location: HurtLocation,
    /// Health actually removed
    pub damage: f32,
    /// Reaction state entered by the defender, if any
    pub reaction: Option<FighterState>,
    /// True when the defender blocked
    pub blocked: bool,
    /// True when the hit knocked the defender out
    pub knocked_out: bool,
}

/// Hurt or knock-up state a hit sends the defender into.
#[must_use]
pub const fn reaction_state(strength: AttackStrength, location: HurtLocation) -> FighterState {
    if resolve(strength).knockup {
        return match strength {
            AttackStrength::KnockLift => FighterState::KnockLift,
            AttackStrength::KnockLiftDown => FighterState::KnockLiftDown,
            _ => FighterState::Knockup,
        };
    }
    match (location, strength.is_light()) {
        (HurtLocation::Head, true) => FighterState::HurtHeadLight,
        (HurtLocation::Head, false) => FighterState::HurtHeadHeavy,
        (_, true) => FighterState::HurtBodyLight,
        (_, false) => FighterState::HurtBodyHeavy,
    }
}

/// True if `defender` is blocking and facing an attacker at `attacker_x`.
#[must_use]
pub fn is_blocking(defender: &Combatant, attacker_x: f32) -> bool {
    matches!(defender.state, FighterState::Block | FighterState::CrouchBlock)
        && defender.direction == defender.direction.toward(defender.position.x, attacker_x)
}

/// Finds where `attacker`'s active hit box strikes `defender`, if anywhere.
#[must_use]
pub fn detect_hit(
    attacker: &Combatant,
    attacker_table: &FrameGeometryTable,
    defender: &Combatant,
    defender_table: &FrameGeometryTable,
) -> Option<(AttackStrength, HurtLocation)> {
    let strength = attack_for_state(attacker.state)?;
    let hit = attacker_table
        .boxes_for(attacker.state, attacker.frame_index)
        .hit;
    if hit.is_empty() {
        return None;
    }
    let hit = hit.to_world(attacker.position, attacker.direction);
    let hurt = defender_table
        .boxes_for(defender.state, defender.frame_index)
        .hurt;
    hurt.prioritized().into_iter().find_map(|(location, rect)| {
        rect.to_world(defender.position, defender.direction)
            .overlaps(&hit)
            .then_some((strength, location))
    })
}

fn pair_mut(fighters: &mut [Combatant; 2], attacker: usize) -> (&mut Combatant, &mut Combatant) {
    let [first, second] = fighters;
    if attacker == 0 {
        (first, second)
    } else {
        (second, first)
    }
}

fn world_push_box(combatant: &Combatant, table: &FrameGeometryTable) -> Rect {
    table
        .boxes_for(combatant.state, combatant.frame_index)
        .push
        .to_world(combatant.position, combatant.direction)
}

/// Resolves hits and push-box separation each tick.
#[derive(Debug, Clone, Default)]
pub struct CollisionResolver {
    tuning: CombatTuning,
    landed: HashMap<CombatantId, u32>,
}

impl CollisionResolver {
    /// Creates a resolver.
    #[must_use]
    pub fn new(tuning: CombatTuning) -> Self {
        Self {
            tuning,
            landed: HashMap::new(),
        }
    }

    /// Combat tuning in use.
    #[must_use]
    pub fn tuning(&self) -> &CombatTuning {
        &self.tuning
    }

    /// Detects and applies hits for both attacker/defender pairs.
    pub fn resolve_hits(
        &mut self,
        fighters: &mut [Combatant; 2],
        tables: [&FrameGeometryTable; 2],
        machine: &StateMachine,
    ) -> Vec<HitEvent> {
        let snapshot = fighters.clone();
        let mut events = Vec::new();

        for (a, d) in [(0, 1), (1, 0)] {
            let attacker = &snapshot[a];
            if snapshot[d].is_knocked_out() {
                continue;
            }
            let Some((strength, location)) =
                detect_hit(attacker, tables[a], &snapshot[d], tables[d])
            else {
                continue;
            };
            if self.landed.get(&attacker.id) == Some(&attacker.activation) {
                continue;
            }
            self.landed.insert(attacker.id, attacker.activation);

            let (attacker, defender) = pair_mut(fighters, a);
            events.push(self.apply_hit(attacker, defender, strength, location, machine));
        }
        events
    }

    fn apply_hit(
        &self,
        attacker: &mut Combatant,
        defender: &mut Combatant,
        strength: AttackStrength,
        location: HurtLocation,
        machine: &StateMachine,
    ) -> HitEvent {
        let blocked = self.tuning.blocking && is_blocking(defender, attacker.position.x);
        let applied = if blocked { AttackStrength::Block } else { strength };
        let definition = resolve(applied);

        let was_standing = !defender.is_knocked_out();
        let damage = defender.take_damage(definition.damage);
        attacker.score = attacker.score.saturating_add(definition.score);
        attacker.skill = attacker
            .skill
            .saturating_add(definition.skill)
            .min(self.tuning.max_skill);
        if let Some(effect) = definition.effect {
            defender.attach_status(effect);
        }

        let knocked_out = was_standing && defender.is_knocked_out();
        let reaction = if knocked_out {
            machine.force(defender, FighterState::Death);
            Some(FighterState::Death)
        } else if blocked {
            None
        } else {
            let target = reaction_state(strength, location);
            let accepted = if definition.knockup {
                machine.request_knockup(defender, target)
            } else {
                machine.request_hurt(defender, target)
            };
            accepted.then_some(target)
        };

        defender.velocity = Vec2::new(
            definition.thrust.x * defender.direction.sign(),
            definition.thrust.y,
        );

        let stage = machine.stage();
        let world_slide = definition.slide.velocity * defender.direction.sign();
        let pinned = (world_slide < 0.0 && defender.position.x <= stage.left())
            || (world_slide > 0.0 && defender.position.x >= stage.right());
        if pinned {
            attacker.slide = definition.slide;
        } else {
            defender.slide = definition.slide;
        }

        if knocked_out {
            info!(
                attacker = %attacker.id,
                defender = %defender.id,
                ?strength,
                "Knockout"
            );
        } else {
            info!(
                attacker = %attacker.id,
                defender = %defender.id,
                ?strength,
                ?location,
                damage,
                blocked,
                "Hit landed"
            );
        }

        HitEvent {
            attacker: attacker.id,
            defender: defender.id,
            strength: applied,
            location,
            damage,
            reaction,
            blocked,
            knocked_out,
        }
    }

    /// Separates overlapping push boxes horizontally.
    ///
    /// The overlap is split evenly; a combatant pinned by a stage edge passes
    /// its share to the other. Returns the overlap depth that was resolved.
    pub fn resolve_push(
        &self,
        fighters: &mut [Combatant; 2],
        tables: [&FrameGeometryTable; 2],
        physics_tuning: &PhysicsTuning,
        stage: &StageBounds,
        seconds_passed: f32,
    ) -> f32 {
        let boxes = [
            world_push_box(&fighters[0], tables[0]),
            world_push_box(&fighters[1], tables[1]),
        ];
        if !boxes[0].overlaps(&boxes[1]) {
            return 0.0;
        }
        let depth = boxes[0].horizontal_overlap(&boxes[1]);

        let first_is_left = match boxes[0].center_x().partial_cmp(&boxes[1].center_x()) {
            Some(std::cmp::Ordering::Less) => true,
            Some(std::cmp::Ordering::Greater) => false,
            _ => fighters[0].position.x <= fighters[1].position.x,
        };
        let (left, right) = pair_mut(fighters, usize::from(!first_is_left));

        let half = depth / 2.0;
        let left_target = left.position.x - half;
        let left_x = stage.clamp_x(left_target);
        let right_target = right.position.x + half + (left_x - left_target);
        let right_x = stage.clamp_x(right_target);
        left.position.x = stage.clamp_x(left_x - (right_target - right_x));
        right.position.x = right_x;

        physics::apply_push_friction(left, right.position.x, physics_tuning.push_friction, seconds_passed);
        physics::apply_push_friction(right, left.position.x, physics_tuning.push_friction, seconds_passed);

        debug!(depth, "Separated push boxes");
        depth
    }

    /// Forgets landed activations (new round).
    pub fn reset(&mut self) {
        self.landed.clear();
    }
}
