//! The game-night workflow around the pure settlement core.
//!
//! [`store::GameStore`] is the seam to whatever holds players and buy-ins,
//! [`store::ChangeFeed`] tells callers when to take a fresh snapshot, and
//! [`game::GameNight`] applies the table rules on top of a store.

pub mod game;
pub mod memory;
pub mod store;
