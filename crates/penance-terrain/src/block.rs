//! Player tile blocking.
//!
//! Players block the tile they stand on against hostile movement, and a
//! tile stays blocked until the player steps off it. The overlay belongs
//! to a game instance, not to the map.

use std::collections::HashSet;

use penance_core::coord::Coord;

#[derive(Debug, Clone, Default)]
pub struct BlockGrid {
    blocked: HashSet<Coord>,
}

impl BlockGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&mut self, tile: Coord) {
        self.blocked.insert(tile);
    }

    pub fn unblock(&mut self, tile: Coord) {
        self.blocked.remove(&tile);
    }

    pub fn is_blocked(&self, tile: Coord) -> bool {
        self.blocked.contains(&tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_and_unblock() {
        let mut grid = BlockGrid::new();
        let tile = Coord::new(20, 20);
        assert!(!grid.is_blocked(tile));
        grid.block(tile);
        assert!(grid.is_blocked(tile));
        grid.unblock(tile);
        assert!(!grid.is_blocked(tile));
    }
}
