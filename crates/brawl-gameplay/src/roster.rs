//! Built-in fighter data.
//!
//! Every state gets an animation built from a handful of shared box presets.
//! Sprite regions lay each state out as one row of 128x128 cells on the
//! character sheet.

use brawl_common::{FighterId, FighterState, Vec2};
use brawl_kernel::{
    Animation, AnimationStep, FrameGeometryTable, FrameHold, FrameRecord, HurtBoxes, Rect,
    SpriteRegion, StageBounds,
};
use tracing::debug;

/// Horizontal distance of each fighter from the stage center at round start.
pub const FIGHTER_START_DISTANCE: f32 = 88.0;

/// Size of one sprite cell on a character sheet.
pub const SPRITE_CELL: f32 = 128.0;

const fn rect(v: [f32; 4]) -> Rect {
    Rect::new(v[0], v[1], v[2], v[3])
}

const fn hurt(v: [[f32; 4]; 3]) -> HurtBoxes {
    HurtBoxes::new(rect(v[0]), rect(v[1]), rect(v[2]))
}

mod push {
    use super::{rect, Rect};

    pub const IDLE: Rect = rect([-16.0, -80.0, 32.0, 78.0]);
    pub const JUMP: Rect = rect([-16.0, -91.0, 32.0, 66.0]);
    pub const BEND: Rect = rect([-16.0, -58.0, 32.0, 58.0]);
    pub const CROUCH: Rect = rect([-16.0, -50.0, 32.0, 50.0]);
}

mod hurtbox {
    use super::{hurt, HurtBoxes};

    pub const NULL: HurtBoxes = HurtBoxes::ZERO;
    pub const IDLE: HurtBoxes = hurt([
        [-8.0, -88.0, 24.0, 16.0],
        [-26.0, -74.0, 48.0, 42.0],
        [-26.0, -31.0, 45.0, 32.0],
    ]);
    pub const BACKWARD: HurtBoxes = hurt([
        [-19.0, -88.0, 24.0, 16.0],
        [-26.0, -74.0, 48.0, 42.0],
        [-26.0, -31.0, 40.0, 32.0],
    ]);
    pub const FORWARD: HurtBoxes = hurt([
        [-3.0, -88.0, 24.0, 16.0],
        [-26.0, -74.0, 48.0, 42.0],
        [-26.0, -31.0, 40.0, 32.0],
    ]);
    pub const JUMP: HurtBoxes = hurt([
        [-3.0, -86.0, 28.0, 18.0],
        [-26.0, -70.0, 48.0, 42.0],
        [-26.0, -31.0, 40.0, 32.0],
    ]);
    pub const BEND: HurtBoxes = hurt([
        [-2.0, -68.0, 24.0, 18.0],
        [-16.0, -53.0, 44.0, 24.0],
        [-16.0, -24.0, 44.0, 24.0],
    ]);
    pub const CROUCH: HurtBoxes = hurt([
        [6.0, -61.0, 24.0, 18.0],
        [-16.0, -46.0, 44.0, 24.0],
        [-16.0, -24.0, 44.0, 24.0],
    ]);
    pub const PUNCH: HurtBoxes = hurt([
        [11.0, -94.0, 24.0, 18.0],
        [-7.0, -77.0, 40.0, 43.0],
        [-7.0, -33.0, 40.0, 33.0],
    ]);
}

mod hitbox {
    use super::{rect, Rect};

    pub const LIGHT_PUNCH: Rect = rect([3.0, -70.0, 50.0, 18.0]);
    pub const HEAVY_PUNCH: Rect = rect([0.0, -70.0, 90.0, 30.0]);
    pub const LIGHT_KICK: Rect = rect([8.0, -60.0, 50.0, 18.0]);
    pub const HEAVY_KICK: Rect = rect([8.0, -55.0, 75.0, 15.0]);
    pub const CROUCH_LIGHTKICK: Rect = rect([8.0, -20.0, 40.0, 18.0]);
    pub const CROUCH_HEAVYKICK: Rect = rect([10.0, -25.0, 55.0, 18.0]);
    pub const JUMP_HEAVYKICK: Rect = rect([8.0, -60.0, 40.0, 18.0]);
    pub const JUMP_LIGHTKICK: Rect = rect([8.0, -60.0, 50.0, 18.0]);
    pub const HYPERSKILL_1: Rect = rect([0.0, -100.0, 400.0, 250.0]);
    pub const SLASH: Rect = rect([3.0, -40.0, 50.0, 18.0]);
}

/// Authoring shape of one state's animation.
#[derive(Debug, Clone, Copy)]
struct MoveData {
    push: Rect,
    hurt: HurtBoxes,
    frames: usize,
    hold_ms: u32,
    /// Hit box and the inclusive frame range it is active on.
    hit: Option<(Rect, usize, usize)>,
    /// Extra final step (freeze or transition marker).
    tail: Option<FrameHold>,
}

impl MoveData {
    const fn new(push: Rect, hurt: HurtBoxes, frames: usize, hold_ms: u32) -> Self {
        Self {
            push,
            hurt,
            frames,
            hold_ms,
            hit: None,
            tail: None,
        }
    }

    const fn hit(mut self, hit: Rect, first: usize, last: usize) -> Self {
        self.hit = Some((hit, first, last));
        self
    }

    const fn tail(mut self, hold: FrameHold) -> Self {
        self.tail = Some(hold);
        self
    }
}

const fn move_data(state: FighterState) -> MoveData {
    use FighterState as S;

    match state {
        S::Idle => MoveData::new(push::IDLE, hurtbox::IDLE, 4, 68),
        S::WalkForward => MoveData::new(push::IDLE, hurtbox::FORWARD, 6, 65),
        S::WalkBackward => MoveData::new(push::IDLE, hurtbox::BACKWARD, 6, 65),
        S::JumpStart => MoveData::new(push::BEND, hurtbox::BEND, 2, 50),
        S::JumpLand => MoveData::new(push::BEND, hurtbox::BEND, 2, 33).tail(FrameHold::Transition),
        S::JumpUp | S::JumpForward | S::JumpBackward => {
            MoveData::new(push::JUMP, hurtbox::JUMP, 5, 100)
        },
        S::Crouch => MoveData::new(push::CROUCH, hurtbox::CROUCH, 0, 0).tail(FrameHold::Freeze),
        S::CrouchDown => {
            MoveData::new(push::BEND, hurtbox::BEND, 2, 30).tail(FrameHold::Transition)
        },
        S::CrouchUp => MoveData::new(push::BEND, hurtbox::BEND, 2, 30).tail(FrameHold::Transition),
        S::IdleTurn => MoveData::new(push::IDLE, hurtbox::IDLE, 3, 33),
        S::CrouchTurn => MoveData::new(push::CROUCH, hurtbox::CROUCH, 3, 33),
        S::LightPunch => {
            MoveData::new(push::IDLE, hurtbox::PUNCH, 8, 33).hit(hitbox::LIGHT_PUNCH, 2, 3)
        },
        S::HeavyPunch => {
            MoveData::new(push::IDLE, hurtbox::PUNCH, 12, 40).hit(hitbox::HEAVY_PUNCH, 4, 5)
        },
        S::LightKick => {
            MoveData::new(push::IDLE, hurtbox::IDLE, 10, 33).hit(hitbox::LIGHT_KICK, 2, 3)
        },
        S::HeavyKick => {
            MoveData::new(push::IDLE, hurtbox::IDLE, 14, 40).hit(hitbox::HEAVY_KICK, 4, 6)
        },
        S::CrouchLightKick => MoveData::new(push::CROUCH, hurtbox::CROUCH, 5, 33)
            .hit(hitbox::CROUCH_LIGHTKICK, 1, 2),
        S::CrouchHeavyKick => MoveData::new(push::CROUCH, hurtbox::CROUCH, 7, 40)
            .hit(hitbox::CROUCH_HEAVYKICK, 2, 3),
        S::JumpLightKick => {
            MoveData::new(push::JUMP, hurtbox::JUMP, 4, 50).hit(hitbox::JUMP_LIGHTKICK, 1, 3)
        },
        S::JumpHeavyKick => {
            MoveData::new(push::JUMP, hurtbox::JUMP, 5, 50).hit(hitbox::JUMP_HEAVYKICK, 1, 3)
        },
        S::HurtHeadLight | S::HurtHeadHeavy | S::HurtBodyLight | S::HurtBodyHeavy => {
            MoveData::new(push::IDLE, hurtbox::IDLE, 4, 66)
        },
        S::Special1 | S::Special2 => {
            MoveData::new(push::IDLE, hurtbox::IDLE, 10, 50).hit(hitbox::HEAVY_PUNCH, 5, 6)
        },
        S::Special2MoveFighter => {
            MoveData::new(push::IDLE, hurtbox::IDLE, 6, 40).hit(hitbox::SLASH, 2, 4)
        },
        S::Special2RockRelease => {
            MoveData::new(push::IDLE, hurtbox::IDLE, 8, 50).hit(hitbox::HEAVY_PUNCH, 4, 5)
        },
        S::Hyperskill1 | S::Hyperskill2 => {
            MoveData::new(push::IDLE, hurtbox::IDLE, 12, 66).hit(hitbox::HYPERSKILL_1, 6, 8)
        },
        S::DodgeForward | S::DodgeBackward => MoveData::new(push::IDLE, hurtbox::NULL, 5, 40),
        S::DashForward | S::DashBackward => MoveData::new(push::IDLE, hurtbox::IDLE, 5, 40),
        S::Block => MoveData::new(push::IDLE, hurtbox::IDLE, 0, 0).tail(FrameHold::Freeze),
        S::CrouchBlock => {
            MoveData::new(push::CROUCH, hurtbox::CROUCH, 0, 0).tail(FrameHold::Freeze)
        },
        S::Death | S::Die => MoveData::new(push::BEND, hurtbox::BEND, 6, 100).tail(FrameHold::Freeze),
        S::Knockup | S::KnockLift | S::KnockLiftDown | S::Fall => {
            MoveData::new(push::JUMP, hurtbox::JUMP, 4, 80)
        },
        S::LaydownGround => MoveData::new(push::CROUCH, hurtbox::NULL, 6, 100),
        S::Getup => MoveData::new(push::BEND, hurtbox::NULL, 5, 66),
        S::Headbutt => {
            MoveData::new(push::IDLE, hurtbox::PUNCH, 8, 40).hit(hitbox::HEAVY_PUNCH, 3, 4)
        },
        S::HeadbuttUp => {
            MoveData::new(push::JUMP, hurtbox::JUMP, 8, 40).hit(hitbox::HEAVY_PUNCH, 3, 4)
        },
        S::HeadbuttDown => {
            MoveData::new(push::JUMP, hurtbox::JUMP, 8, 40).hit(hitbox::JUMP_HEAVYKICK, 3, 4)
        },
        S::KneeDash => {
            MoveData::new(push::IDLE, hurtbox::IDLE, 8, 40).hit(hitbox::HEAVY_KICK, 2, 5)
        },
        S::TornadoDig => MoveData::new(push::CROUCH, hurtbox::CROUCH, 10, 50)
            .hit(hitbox::CROUCH_HEAVYKICK, 4, 6),
        S::Pickup => MoveData::new(push::BEND, hurtbox::BEND, 6, 66),
    }
}

/// Percent applied to every timed hold of a character.
const fn hold_scale(fighter: FighterId) -> u32 {
    match fighter {
        FighterId::Malupiton => 100,
        FighterId::Golem => 125,
    }
}

/// Builds the frame table of a built-in character.
#[must_use]
pub fn builtin_table(fighter: FighterId) -> FrameGeometryTable {
    let scale = hold_scale(fighter);
    let mut table = FrameGeometryTable::new();

    for state in FighterState::ALL {
        let data = move_data(state);
        let row = state.index() as f32 * SPRITE_CELL;
        let total = data.frames + usize::from(data.tail.is_some());
        let mut steps = Vec::with_capacity(total);

        for frame in 0..total {
            let key = format!("{}-{}", state.as_str(), frame + 1);
            let hit = match data.hit {
                Some((hit, first, last)) if (first..=last).contains(&frame) => hit,
                _ => Rect::ZERO,
            };
            let sprite = SpriteRegion {
                source: Rect::new(frame as f32 * SPRITE_CELL, row, SPRITE_CELL, SPRITE_CELL),
                origin: Vec2::new(SPRITE_CELL / 2.0, SPRITE_CELL - 8.0),
            };
            table.insert_frame(key.clone(), FrameRecord::new(sprite, data.push, data.hurt, hit));

            let hold = match data.tail {
                Some(tail) if frame == data.frames => tail,
                _ => FrameHold::Millis(data.hold_ms * scale / 100),
            };
            steps.push(AnimationStep::new(key, hold));
        }
        table.insert_animation(state, Animation::new(steps));
    }

    debug!(%fighter, frames = table.frame_count(), "Built roster frame table");
    table
}

/// Round-start positions: player one left of center facing right, player two
/// right of center facing left.
#[must_use]
pub fn start_positions(stage: &StageBounds) -> [Vec2; 2] {
    let mid = stage.mid_x();
    [
        Vec2::new(mid - FIGHTER_START_DISTANCE, stage.floor),
        Vec2::new(mid + FIGHTER_START_DISTANCE, stage.floor),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attacks::attack_for_state;
    use crate::state_machine::cancel_window;

    #[test]
    fn test_every_state_has_animation() {
        for fighter in [FighterId::Malupiton, FighterId::Golem] {
            let table = builtin_table(fighter);
            assert!(table.states_without_animation().is_empty());
            assert!(table.missing_frames().is_empty());
        }
    }

    #[test]
    fn test_attacks_have_active_hit_frames() {
        let table = builtin_table(FighterId::Malupiton);
        for state in FighterState::ALL {
            let Ok(animation) = table.animation(state) else {
                panic!("no animation for {state}");
            };
            let active = (0..animation.len())
                .filter(|i| !table.boxes_for(state, *i).hit.is_empty())
                .count();
            assert_eq!(active > 0, attack_for_state(state).is_some(), "{state}");
        }
    }

    #[test]
    fn test_cancel_windows_fit_animations() {
        let table = builtin_table(FighterId::Malupiton);
        for state in FighterState::ALL {
            if let Some(window) = cancel_window(state) {
                let len = table.animation(state).map(Animation::len).unwrap_or(0);
                assert!(window.end < len, "{state} window past its last frame");
            }
        }
    }

    #[test]
    fn test_golem_holds_are_slower() {
        let malupiton = builtin_table(FighterId::Malupiton);
        let golem = builtin_table(FighterId::Golem);
        let hold = |table: &FrameGeometryTable| {
            table
                .animation(FighterState::Idle)
                .ok()
                .and_then(|a| a.step(0).map(|s| s.hold))
        };
        assert_eq!(hold(&malupiton), Some(FrameHold::Millis(68)));
        assert_eq!(hold(&golem), Some(FrameHold::Millis(85)));
    }

    #[test]
    fn test_block_freezes_and_crouch_down_transitions() {
        let table = builtin_table(FighterId::Malupiton);
        let block = table.animation(FighterState::Block).ok();
        assert_eq!(block.map(Animation::len), Some(1));
        assert_eq!(
            block.and_then(|a| a.step(0)).map(|s| s.hold),
            Some(FrameHold::Freeze)
        );

        let crouch_down = table.animation(FighterState::CrouchDown).ok();
        assert_eq!(
            crouch_down.and_then(|a| a.step(2)).map(|s| s.hold),
            Some(FrameHold::Transition)
        );
    }

    #[test]
    fn test_start_positions() {
        let stage = StageBounds::default();
        let [p1, p2] = start_positions(&stage);
        assert_eq!(p2.x - p1.x, 2.0 * FIGHTER_START_DISTANCE);
        assert_eq!(p1.y, stage.floor);
        assert_eq!((p1.x + p2.x) / 2.0, stage.mid_x());
    }
}
