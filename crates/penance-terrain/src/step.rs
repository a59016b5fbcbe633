//! Single-step legality for players and hostiles.

use penance_core::coord::Coord;

use crate::block::BlockGrid;
use crate::map::TileMap;

/// Whether a player can step from `from` to the adjacent tile `to`.
///
/// Cardinal steps only need the destination free. A diagonal step also
/// needs both orthogonal corner tiles free, and the destination must be
/// reachable from each corner; otherwise the path is L-shaped and this
/// is not a single step.
pub fn can_step(map: &TileMap, from: Coord, to: Coord) -> bool {
    can_step_inner(map, None, from, to)
}

/// The hostile flavor. Hostiles additionally cannot enter platform
/// tiles or tiles blocked by a standing player.
pub fn can_npc_step(map: &TileMap, block: &BlockGrid, from: Coord, to: Coord) -> bool {
    if map.level_at(to) > 1 {
        return false;
    }
    if block.is_blocked(to) {
        return false;
    }
    can_step_inner(map, Some(block), from, to)
}

fn can_step_inner(map: &TileMap, npc_block: Option<&BlockGrid>, from: Coord, to: Coord) -> bool {
    if from.chebyshev_to(to) > 1 {
        return false;
    }
    if (map.level_at(from) - map.level_at(to)).abs() > 1 {
        return false;
    }
    if !map.is_walkable(to) {
        return false;
    }
    if from.taxicab_to(to) == 1 {
        return true;
    }
    if from.chebyshev_to(to) != 1 {
        // Stepping in place is not a step.
        return false;
    }

    // Diagonal. Corner tiles are checked with the caller's flavor, the
    // corner-to-destination hops always with the player flavor.
    let delta = to - from;
    let x_corner = Coord::new(from.x + delta.x, from.y);
    let y_corner = Coord::new(from.x, from.y + delta.y);
    let corner_free = |corner: Coord| match npc_block {
        Some(block) => can_npc_step(map, block, from, corner),
        None => can_step(map, from, corner),
    };
    corner_free(x_corner)
        && corner_free(y_corner)
        && can_step(map, x_corner, to)
        && can_step(map, y_corner, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use penance_core::coord::{EAST, NORTH, NORTH_EAST, SOUTH};

    #[test]
    fn cardinal_steps_on_open_floor() {
        let map = TileMap::standard();
        let tile = Coord::new(20, 22);
        for dir in [NORTH, SOUTH, EAST] {
            assert!(can_step(&map, tile, tile + dir));
        }
    }

    #[test]
    fn cannot_step_into_walls() {
        let map = TileMap::standard();
        // (1, 12) is floor right beside the west wall.
        let tile = Coord::new(1, 12);
        assert!(!can_step(&map, tile, Coord::new(0, 12)));
    }

    #[test]
    fn diagonal_needs_both_corners() {
        let map = TileMap::standard();
        // Beside the attacker dispenser: the diagonal hop around its
        // corner is refused even though the destination itself is open.
        let from = Coord::new(21, 35);
        let to = from + NORTH_EAST;
        assert!(map.is_walkable(to));
        assert!(!can_step(&map, from, to));
        // The L-shaped route via the north tile is fine.
        assert!(can_step(&map, from, from + NORTH));
        assert!(can_step(&map, from + NORTH, to));
    }

    #[test]
    fn npcs_respect_player_blocking() {
        let map = TileMap::standard();
        let mut block = BlockGrid::new();
        let from = Coord::new(20, 22);
        let to = from + EAST;
        assert!(can_npc_step(&map, &block, from, to));
        block.block(to);
        assert!(!can_npc_step(&map, &block, from, to));
        // Players ignore the overlay.
        assert!(can_step(&map, from, to));
    }

    #[test]
    fn npcs_cannot_climb_ramps() {
        let map = TileMap::standard();
        let block = BlockGrid::new();
        // The ramp tile south of the west platform is level 1 and open
        // to everyone; the platform tile above it is level 2 and open
        // to players only.
        let ramp = Coord::new(9, 20);
        let platform = ramp + NORTH;
        assert!(can_npc_step(&map, &block, ramp + SOUTH, ramp));
        assert!(!can_npc_step(&map, &block, ramp, platform));
        assert!(can_step(&map, ramp, platform));
    }
}
