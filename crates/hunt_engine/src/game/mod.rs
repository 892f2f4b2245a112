//! Gameplay-level helpers built on the core
//!
//! - [`factories`] - component sets for ducks, guns and scenery
//! - [`round`] - score and round bookkeeping driven by events

pub mod factories;
pub mod round;

pub use factories::{
    aim_gun, spawn_duck, spawn_duck_deferred, spawn_environment_block, spawn_gun, DuckParams,
};
pub use round::{RoundStatus, RoundTracker};
