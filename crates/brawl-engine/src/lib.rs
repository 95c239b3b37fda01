//! # Brawl Engine
//!
//! Host side of the Brawl combat core.
//!
//! This crate drives a fight without a window:
//! - Match configuration loaded from `brawl.toml`
//! - Fixed-step tick clock
//! - Scripted inputs, a recording surface and the headless match runner

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod driver;
pub mod timing;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::driver::*;
    pub use crate::timing::*;
}

pub use prelude::*;
