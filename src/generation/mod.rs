//! # Generation Module
//!
//! The randomized subsystems of the game: the weighted room draw engine,
//! the depth-based door lock generator, and the table-driven loot resolver.
//!
//! All randomness flows through a single `StdRng` owned by the controller
//! and passed in by the caller, so whole runs are reproducible from a seed.

pub mod draw;
pub mod locks;
pub mod loot;

pub use draw::*;
pub use locks::*;
pub use loot::*;
