//! ID types for combatants and characters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for combatant IDs.
static COMBATANT_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a combatant in a fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatantId(u64);

impl CombatantId {
    /// Creates a new unique combatant ID.
    #[must_use]
    pub fn new() -> Self {
        Self(COMBATANT_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Creates a combatant ID from a raw value.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Null/invalid combatant ID.
    pub const NULL: Self = Self(0);

    /// Checks if this is a valid (non-null) combatant ID.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl Default for CombatantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Playable character identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FighterId {
    /// The default brawler.
    Malupiton,
    /// The rock golem (has the Golem-only moves).
    Golem,
}

impl FighterId {
    /// Display name of the character.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Malupiton => "Malupiton",
            Self::Golem => "Golem",
        }
    }
}

impl fmt::Display for FighterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
