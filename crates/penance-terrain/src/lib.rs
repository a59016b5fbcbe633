//! The arena map and everything spatial: tile legality, player blocking,
//! line of sight, and both pathfinding flavors.
//!
//! Players path with a full breadth-first search up front; hostiles path
//! reactively one step per tick. Both styles live in [`path`].

pub mod block;
pub mod los;
pub mod map;
pub mod path;
pub mod step;

pub use block::BlockGrid;
pub use map::{Landmarks, TileMap};
