//! Fighter state machine.
//!
//! Transitions come from three places, each with its own gate:
//! - input requests: legal from neutral states or inside an attack's cancel window
//! - hurt and knock-up reactions: legal only from the matching guard set
//! - forced entries (animation exit, landing, knockout): always legal
//!
//! A rejected request is dropped. It is not queued and it is not an error.

use brawl_common::{BrawlResult, Direction, FighterState, StateSet};
use brawl_kernel::{FrameGeometryTable, FrameHold, StageBounds};
use tracing::{debug, trace};

use crate::combatant::Combatant;
use crate::physics::{self, PhysicsTuning};

use FighterState as S;

/// States that may be interrupted by a hurt reaction.
///
/// A launched combatant (`Knockup`) is not in this set: further hits still
/// deal damage but do not pull it out of the air.
pub const HURT_STATE_VALID_FROM: StateSet = StateSet::from_slice(&[
    S::Idle,
    S::WalkBackward,
    S::WalkForward,
    S::JumpLand,
    S::JumpStart,
    S::IdleTurn,
    S::JumpUp,
    S::JumpForward,
    S::JumpBackward,
    S::LightPunch,
    S::HeavyPunch,
    S::LightKick,
    S::HeavyKick,
    S::HurtHeadLight,
    S::HurtHeadHeavy,
    S::HurtBodyLight,
    S::HurtBodyHeavy,
    S::CrouchLightKick,
    S::CrouchHeavyKick,
    S::Crouch,
    S::CrouchDown,
    S::CrouchUp,
    S::CrouchTurn,
    S::JumpHeavyKick,
    S::JumpLightKick,
    S::Special1,
    S::Special2,
    S::DodgeBackward,
    S::DodgeForward,
    S::Block,
    S::CrouchBlock,
    S::Hyperskill2,
    S::Die,
    S::Death,
    S::Special2MoveFighter,
    S::KnockLift,
    S::KnockLiftDown,
    S::Headbutt,
    S::KneeDash,
    S::HeadbuttDown,
    S::HeadbuttUp,
    S::TornadoDig,
    S::Pickup,
]);

/// States that may be interrupted by a knock-up reaction.
pub const KNOCKUP_STATE_VALID_FROM: StateSet = StateSet::from_slice(&[
    S::Idle,
    S::WalkBackward,
    S::WalkForward,
    S::JumpLand,
    S::JumpStart,
    S::IdleTurn,
    S::JumpUp,
    S::JumpForward,
    S::JumpBackward,
    S::LightPunch,
    S::HeavyPunch,
    S::LightKick,
    S::HeavyKick,
    S::HurtHeadLight,
    S::HurtHeadHeavy,
    S::HurtBodyLight,
    S::HurtBodyHeavy,
    S::CrouchLightKick,
    S::CrouchHeavyKick,
    S::Crouch,
    S::CrouchDown,
    S::CrouchUp,
    S::CrouchTurn,
    S::JumpHeavyKick,
    S::JumpLightKick,
    S::Special1,
    S::Special2,
    S::DodgeBackward,
    S::DodgeForward,
    S::Block,
    S::CrouchBlock,
    S::Hyperskill2,
    S::Knockup,
    S::KnockLift,
    S::KnockLiftDown,
    S::Headbutt,
    S::Special2MoveFighter,
    S::LaydownGround,
    S::KneeDash,
    S::HeadbuttDown,
    S::HeadbuttUp,
    S::Fall,
    S::TornadoDig,
    S::Pickup,
]);

/// Grounded states that accept any input request.
pub const NEUTRAL_STATES: StateSet = StateSet::from_slice(&[
    S::Idle,
    S::WalkForward,
    S::WalkBackward,
    S::Crouch,
    S::CrouchDown,
    S::CrouchUp,
    S::IdleTurn,
    S::CrouchTurn,
    S::Block,
    S::CrouchBlock,
]);

/// Rising or falling jumps. Only [`AIR_ATTACK_STATES`] may be requested from them.
pub const JUMP_STATES: StateSet =
    StateSet::from_slice(&[S::JumpUp, S::JumpForward, S::JumpBackward]);

/// Attacks that can be started in mid-air.
pub const AIR_ATTACK_STATES: StateSet =
    StateSet::from_slice(&[S::JumpLightKick, S::JumpHeavyKick]);

/// States only reachable through reactions or forced entry, never by input.
pub const REACTION_STATES: StateSet = StateSet::from_slice(&[
    S::HurtHeadLight,
    S::HurtHeadHeavy,
    S::HurtBodyLight,
    S::HurtBodyHeavy,
    S::Knockup,
    S::KnockLift,
    S::KnockLiftDown,
    S::Fall,
    S::LaydownGround,
    S::Getup,
    S::Death,
    S::Die,
    S::JumpLand,
]);

/// States that end when the combatant touches the floor.
pub const AIRBORNE_STATES: StateSet = StateSet::from_slice(&[
    S::JumpUp,
    S::JumpForward,
    S::JumpBackward,
    S::JumpLightKick,
    S::JumpHeavyKick,
    S::Knockup,
    S::KnockLift,
    S::KnockLiftDown,
    S::Fall,
]);

/// States that turn around to keep facing the opponent.
pub const FACING_STATES: StateSet = StateSet::from_slice(&[
    S::Idle,
    S::WalkForward,
    S::WalkBackward,
    S::Crouch,
    S::Block,
    S::CrouchBlock,
]);

/// Returns true if a hurt reaction may interrupt `state`.
#[must_use]
pub const fn can_accept_hurt_reaction(state: FighterState) -> bool {
    HURT_STATE_VALID_FROM.contains(state)
}

/// Returns true if a knock-up reaction may interrupt `state`.
#[must_use]
pub const fn can_accept_knockup_reaction(state: FighterState) -> bool {
    KNOCKUP_STATE_VALID_FROM.contains(state)
}

/// Inclusive frame-index range in which an attack may be cancelled by input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelWindow {
    /// First cancellable frame
    pub start: usize,
    /// Last cancellable frame
    pub end: usize,
}

impl CancelWindow {
    /// Creates a window.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns true if `frame_index` lies inside the window.
    #[must_use]
    pub const fn contains(self, frame_index: usize) -> bool {
        frame_index >= self.start && frame_index <= self.end
    }
}

/// Cancel window of a state, if it has one.
#[must_use]
pub const fn cancel_window(state: FighterState) -> Option<CancelWindow> {
    match state {
        S::LightPunch => Some(CancelWindow::new(2, 6)),
        S::HeavyPunch => Some(CancelWindow::new(4, 10)),
        S::LightKick => Some(CancelWindow::new(2, 8)),
        S::HeavyKick => Some(CancelWindow::new(4, 12)),
        _ => None,
    }
}

/// What happens when a state's animation runs past its last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPolicy {
    /// Start over at frame 0.
    Loop,
    /// Enter another state.
    ExitTo(FighterState),
    /// Stay on the last frame until something else moves the combatant on.
    HoldLast,
}

/// Built-in animation policy of a state.
#[must_use]
pub const fn default_policy(state: FighterState) -> AnimationPolicy {
    use AnimationPolicy::{ExitTo, HoldLast, Loop};

    match state {
        S::Idle | S::WalkForward | S::WalkBackward | S::Crouch | S::Block | S::CrouchBlock => Loop,
        S::CrouchLightKick | S::CrouchHeavyKick | S::CrouchDown | S::CrouchTurn => ExitTo(S::Crouch),
        S::JumpStart => ExitTo(S::JumpUp),
        S::LaydownGround => ExitTo(S::Getup),
        S::JumpUp
        | S::JumpForward
        | S::JumpBackward
        | S::JumpLightKick
        | S::JumpHeavyKick
        | S::Knockup
        | S::KnockLift
        | S::KnockLiftDown
        | S::Fall
        | S::Death
        | S::Die => HoldLast,
        _ => ExitTo(S::Idle),
    }
}

/// State entered on touching the floor from an airborne state.
#[must_use]
pub const fn landing_state(state: FighterState) -> Option<FighterState> {
    match state {
        S::JumpUp | S::JumpForward | S::JumpBackward | S::JumpLightKick | S::JumpHeavyKick => {
            Some(S::JumpLand)
        },
        S::Knockup | S::KnockLift | S::KnockLiftDown | S::Fall => Some(S::LaydownGround),
        _ => None,
    }
}

/// Result of one frame advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAdvance {
    /// Still on the same frame.
    Held,
    /// Moved to the given frame.
    Advanced(usize),
    /// Wrapped back to frame 0.
    Looped,
    /// Left the animation for another state.
    Exited {
        /// State whose animation finished
        from: FighterState,
        /// State entered
        to: FighterState,
    },
    /// Resting on the last frame.
    Finished,
}

/// Transition rules and per-state animation policies.
#[derive(Debug, Clone)]
pub struct StateMachine {
    policies: [AnimationPolicy; FighterState::COUNT],
    physics: PhysicsTuning,
    stage: StageBounds,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new(PhysicsTuning::default(), StageBounds::default())
    }
}

impl StateMachine {
    /// Creates a state machine with the built-in policies.
    #[must_use]
    pub fn new(physics: PhysicsTuning, stage: StageBounds) -> Self {
        let mut policies = [AnimationPolicy::Loop; FighterState::COUNT];
        for state in FighterState::ALL {
            policies[state.index()] = default_policy(state);
        }
        Self {
            policies,
            physics,
            stage,
        }
    }

    /// Overrides the animation policy of one state.
    #[must_use]
    pub fn with_policy(mut self, state: FighterState, policy: AnimationPolicy) -> Self {
        self.policies[state.index()] = policy;
        self
    }

    /// Current policy of a state.
    #[must_use]
    pub fn policy(&self, state: FighterState) -> AnimationPolicy {
        self.policies[state.index()]
    }

    /// Movement tuning used for entry motion.
    #[must_use]
    pub fn physics(&self) -> &PhysicsTuning {
        &self.physics
    }

    /// Stage used for entry motion.
    #[must_use]
    pub fn stage(&self) -> &StageBounds {
        &self.stage
    }

    /// Accumulates elapsed time on the current frame and moves the animation on.
    ///
    /// The frame timer restarts at zero after each advance; leftover time is
    /// not carried over.
    pub fn advance_frame(
        &self,
        combatant: &mut Combatant,
        seconds_passed: f32,
        table: &FrameGeometryTable,
    ) -> BrawlResult<FrameAdvance> {
        let animation = table.animation(combatant.state)?;
        let last = animation.len() - 1;
        let index = combatant.frame_index.min(last);
        combatant.frame_index = index;

        let hold = match animation.step(index) {
            Some(step) => step.hold,
            None => return Ok(FrameAdvance::Held),
        };

        match hold {
            FrameHold::Freeze => Ok(FrameAdvance::Held),
            FrameHold::Transition => Ok(self.finish(combatant)),
            FrameHold::Millis(ms) => {
                combatant.frame_elapsed_ms += seconds_passed.max(0.0) * 1000.0;
                if combatant.frame_elapsed_ms < ms as f32 {
                    return Ok(FrameAdvance::Held);
                }
                combatant.frame_elapsed_ms = 0.0;
                if index < last {
                    combatant.frame_index = index + 1;
                    Ok(FrameAdvance::Advanced(index + 1))
                } else {
                    Ok(self.finish(combatant))
                }
            },
        }
    }

    fn finish(&self, combatant: &mut Combatant) -> FrameAdvance {
        match self.policy(combatant.state) {
            AnimationPolicy::Loop => {
                combatant.frame_index = 0;
                combatant.frame_elapsed_ms = 0.0;
                FrameAdvance::Looped
            },
            AnimationPolicy::ExitTo(to) => {
                let from = combatant.state;
                self.force(combatant, to);
                FrameAdvance::Exited { from, to }
            },
            AnimationPolicy::HoldLast => FrameAdvance::Finished,
        }
    }

    /// Requests an input-driven transition. Returns true if it was taken.
    pub fn request_input(&self, combatant: &mut Combatant, target: FighterState) -> bool {
        if REACTION_STATES.contains(target) {
            trace!(%target, "Input cannot request a reaction state");
            return false;
        }
        let current = combatant.state;
        let jumping = JUMP_STATES.contains(current);
        if jumping || !physics::is_grounded(combatant, &self.stage) {
            if current == target && jumping {
                return true;
            }
            if jumping && AIR_ATTACK_STATES.contains(target) {
                self.force(combatant, target);
                return true;
            }
            trace!(id = %combatant.id, %current, %target, "Dropped airborne input request");
            return false;
        }
        if current == target && NEUTRAL_STATES.contains(current) {
            return true;
        }

        let in_window =
            cancel_window(current).is_some_and(|w| w.contains(combatant.frame_index));
        if !NEUTRAL_STATES.contains(current) && !in_window {
            trace!(
                id = %combatant.id,
                %current,
                %target,
                frame = combatant.frame_index,
                "Dropped input request"
            );
            return false;
        }

        self.force(combatant, target);
        true
    }

    /// Requests a hurt reaction. Returns true if it was taken.
    pub fn request_hurt(&self, combatant: &mut Combatant, target: FighterState) -> bool {
        if can_accept_hurt_reaction(combatant.state) {
            self.force(combatant, target);
            true
        } else {
            trace!(id = %combatant.id, current = %combatant.state, "Hurt reaction rejected");
            false
        }
    }

    /// Requests a knock-up reaction. Returns true if it was taken.
    pub fn request_knockup(&self, combatant: &mut Combatant, target: FighterState) -> bool {
        if can_accept_knockup_reaction(combatant.state) {
            self.force(combatant, target);
            true
        } else {
            trace!(id = %combatant.id, current = %combatant.state, "Knock-up reaction rejected");
            false
        }
    }

    /// Enters a state unconditionally.
    pub fn force(&self, combatant: &mut Combatant, target: FighterState) {
        debug!(id = %combatant.id, from = %combatant.state, to = %target, "State transition");
        combatant.state = target;
        combatant.frame_index = 0;
        combatant.frame_elapsed_ms = 0.0;
        combatant.activation = combatant.activation.wrapping_add(1);
        physics::apply_entry_motion(combatant, &self.physics, &self.stage);
    }

    /// Ends an airborne state on floor contact. Returns the state entered.
    pub fn land(&self, combatant: &mut Combatant) -> Option<FighterState> {
        let target = landing_state(combatant.state)?;
        self.force(combatant, target);
        Some(target)
    }

    /// Turns a combatant in a neutral state toward `opponent_x`.
    ///
    /// Standing and crouching combatants play their turn animation.
    pub fn face(&self, combatant: &mut Combatant, opponent_x: f32) {
        if !FACING_STATES.contains(combatant.state) {
            return;
        }
        let facing = combatant
            .direction
            .toward(combatant.position.x, opponent_x);
        if facing == combatant.direction {
            return;
        }
        combatant.direction = facing;
        match combatant.state {
            S::Idle => self.force(combatant, S::IdleTurn),
            S::Crouch | S::CrouchBlock => self.force(combatant, S::CrouchTurn),
            _ => physics::apply_entry_motion(combatant, &self.physics, &self.stage),
        }
    }
}

/// Facing a combatant should have toward its opponent.
#[must_use]
pub fn facing_toward(combatant: &Combatant, opponent_x: f32) -> Direction {
    combatant
        .direction
        .toward(combatant.position.x, opponent_x)
}
