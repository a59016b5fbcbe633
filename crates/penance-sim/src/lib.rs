//! Headless tick engine for a five-player wave-defense minigame.
//!
//! A [`engine::Game`] owns the whole simulation: the arena, the five
//! role players, and the active wave with its hostiles, ground items,
//! and call rotations. Everything advances in discrete ticks; commands
//! are applied between ticks and the engine is fully deterministic for
//! a given seed and command sequence.

pub mod deferred;
pub mod engine;
pub mod log;
pub mod npc;
pub mod objects;
pub mod penance;
pub mod player;
pub mod players;
pub mod render;
pub mod snapshot;
pub mod unit;
pub mod wave;

#[cfg(test)]
mod tests;

pub use engine::Game;
