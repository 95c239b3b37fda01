//! Fighter states and constant-time state sets.
//!
//! States form a flat enumeration; every state owns one animation in the frame
//! table. Each variant carries the string id used by authored frame data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! fighter_states {
    ($($(#[$meta:meta])* $variant:ident => $id:literal,)+) => {
        /// Animation/behaviour state of a combatant.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum FighterState {
            $(
                $(#[$meta])*
                #[serde(rename = $id)]
                $variant,
            )+
        }

        impl FighterState {
            /// Every state, in declaration order.
            pub const ALL: [Self; Self::COUNT] = [$(Self::$variant,)+];

            /// Authored string id of the state.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $id,)+
                }
            }
        }

        impl FromStr for FighterState {
            type Err = UnknownState;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($id => Ok(Self::$variant),)+
                    _ => Err(UnknownState(s.to_string())),
                }
            }
        }
    };
}

fighter_states! {
    /// Standing still.
    Idle => "idle",
    /// Walking toward the opponent.
    WalkForward => "walkForwards",
    /// Walking away from the opponent.
    WalkBackward => "walkBackwards",
    /// Neutral jump.
    JumpUp => "jumpUp",
    /// Jump wind-up.
    JumpStart => "jumpStart",
    /// Landing recovery.
    JumpLand => "jumpLand",
    /// Jump toward the opponent.
    JumpForward => "jumpForwards",
    /// Jump away from the opponent.
    JumpBackward => "jumpBackwards",
    /// Holding crouch.
    Crouch => "crouch",
    /// Crouching down.
    CrouchDown => "crouchDown",
    /// Standing up from crouch.
    CrouchUp => "crouchUp",
    /// Turning around while standing.
    IdleTurn => "idleTurn",
    /// Turning around while crouched.
    CrouchTurn => "crouchTurn",
    /// Light punch.
    LightPunch => "lightPunch",
    /// Light kick.
    LightKick => "lightKick",
    /// Heavy punch.
    HeavyPunch => "heavyPunch",
    /// Heavy kick.
    HeavyKick => "heavyKick",
    /// Crouching light kick.
    CrouchLightKick => "crouch-lightkick",
    /// Crouching heavy kick.
    CrouchHeavyKick => "crouch-heavykick",
    /// Airborne light kick.
    JumpLightKick => "jump-lightkick",
    /// Airborne heavy kick.
    JumpHeavyKick => "jump-heavykick",
    /// Hit in the head by a light attack.
    HurtHeadLight => "hurt-head-light",
    /// Hit in the head by a heavy attack.
    HurtHeadHeavy => "hurt-head-heavy",
    /// Hit in the body by a light attack.
    HurtBodyLight => "hurt-body-light",
    /// Hit in the body by a heavy attack.
    HurtBodyHeavy => "hurt-body-heavy",
    /// First special move.
    Special1 => "special-1",
    /// Second special move.
    Special2 => "special-2",
    /// Second special, travelling phase.
    Special2MoveFighter => "special-2-movefighter",
    /// Second special, rock release phase.
    Special2RockRelease => "special-2-rockrelease",
    /// First hyper skill.
    Hyperskill1 => "hyper-skill1",
    /// Second hyper skill.
    Hyperskill2 => "hyper-skill2",
    /// Forward dodge.
    DodgeForward => "dodge-forward",
    /// Backward dodge.
    DodgeBackward => "dodge-backward",
    /// Forward dash.
    DashForward => "dash-forward",
    /// Backward dash.
    DashBackward => "dash-backward",
    /// Standing block.
    Block => "block",
    /// Crouching block.
    CrouchBlock => "crouch-block",
    /// Knocked out.
    Death => "death",
    /// Launched into the air.
    Knockup => "knockup",
    /// Getting up from the floor.
    Getup => "getup",
    /// Dying animation.
    Die => "die",
    /// Falling.
    Fall => "fall",
    /// Lying on the ground.
    LaydownGround => "laydown_ground",
    /// Lifted upward by a hit.
    KnockLift => "knock-lift",
    /// Driven downward by a hit.
    KnockLiftDown => "knock-lift-down",
    /// Headbutt.
    Headbutt => "headbutt",
    /// Rising headbutt.
    HeadbuttUp => "headbutt-up",
    /// Diving headbutt.
    HeadbuttDown => "headbutt-down",
    /// Golem knee dash.
    KneeDash => "knee-dash",
    /// Golem tornado dig.
    TornadoDig => "tornado-dig",
    /// Golem rock pickup.
    Pickup => "pickup",
}

impl FighterState {
    /// Number of states.
    pub const COUNT: usize = 51;

    /// Dense index of the state, usable for arrays and bitsets.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl Default for FighterState {
    fn default() -> Self {
        Self::Idle
    }
}

impl fmt::Display for FighterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown state id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fighter state: {0}")]
pub struct UnknownState(pub String);

/// Fixed-size set of fighter states with O(1) membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StateSet(u64);

impl StateSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Builds a set from a list of states (usable in constants).
    #[must_use]
    pub const fn from_slice(states: &[FighterState]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < states.len() {
            bits |= 1 << states[i].index();
            i += 1;
        }
        Self(bits)
    }

    /// Returns the set with `state` added.
    #[must_use]
    pub const fn with(self, state: FighterState) -> Self {
        Self(self.0 | (1 << state.index()))
    }

    /// Checks membership.
    #[must_use]
    pub const fn contains(self, state: FighterState) -> bool {
        self.0 & (1 << state.index()) != 0
    }

    /// Number of states in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = FighterState> {
        FighterState::ALL
            .into_iter()
            .filter(move |s| self.contains(*s))
    }
}
