//! Core types and definitions for the penance simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! tile coordinates, role/species/item enums, player commands, state
//! snapshots, events, errors, and constants. It has no dependency on any
//! runtime framework and performs no game logic of its own.

pub mod commands;
pub mod constants;
pub mod coord;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;

#[cfg(test)]
mod tests;
