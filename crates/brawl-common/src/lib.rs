//! # Brawl Common
//!
//! Common types, utilities, and shared abstractions for the Brawl combat core.
//!
//! This crate provides foundational types used across all Brawl subsystems:
//! - Vector and facing types (world positions, velocities, mirroring sign)
//! - ID types (combatant and character identity)
//! - The flat fighter state enumeration and its bitset
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;
pub mod ids;
pub mod state;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::state::*;
}

pub use prelude::*;
