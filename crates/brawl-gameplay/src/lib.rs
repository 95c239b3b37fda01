//! # Brawl Gameplay
//!
//! Combat rules for the Brawl fighting core.
//!
//! This crate provides everything that decides what happens in a fight:
//! - Attack catalog (damage, thrust, slide, status effects per strength)
//! - Combatant record
//! - Fighter state machine with guard sets and cancel windows
//! - Physics integration (entry motion, gravity, slide decay, landing)
//! - Collision resolution (hits, trades, push separation)
//! - Built-in roster frame data
//! - The fight orchestrator running the fixed-order tick

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod attacks;
pub mod collision;
pub mod combatant;
pub mod fight;
pub mod physics;
pub mod roster;
pub mod state_machine;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::attacks::*;
    pub use crate::collision::*;
    pub use crate::combatant::*;
    pub use crate::fight::*;
    pub use crate::physics::*;
    pub use crate::roster::*;
    pub use crate::state_machine::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use brawl_common::{Direction, FighterId, FighterState, Vec2};

    #[test]
    fn test_jab_cancels_into_kick_and_both_land() {
        let table = builtin_table(FighterId::Malupiton);
        let machine = StateMachine::default();
        let mut resolver = CollisionResolver::default();
        let mut fighters = [
            Combatant::new(FighterId::Malupiton, Vec2::new(300.0, 220.0), Direction::Right),
            Combatant::new(FighterId::Golem, Vec2::new(340.0, 220.0), Direction::Left),
        ];

        machine.force(&mut fighters[0], FighterState::LightPunch);
        fighters[0].frame_index = 2;
        let jab = resolver.resolve_hits(&mut fighters, [&table, &table], &machine);
        assert_eq!(jab.len(), 1);

        assert!(machine.request_input(&mut fighters[0], FighterState::LightKick));
        fighters[0].frame_index = 2;
        let kick = resolver.resolve_hits(&mut fighters, [&table, &table], &machine);
        assert_eq!(kick.len(), 1);
        assert_eq!(fighters[1].health, 92.0);
        assert_eq!(fighters[0].score, 200);
    }
}
