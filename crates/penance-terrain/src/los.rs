//! Line-of-sight rasterization.
//!
//! Sight lines are traced in 16-bit fixed point along the longer axis,
//! starting from the half-tile so rays leave through tile faces rather
//! than corners. Arithmetic right shift keeps the floor semantics for
//! negative slopes.

use penance_core::constants::{LOS_HALF_TILE, LOS_SHIFT};
use penance_core::coord::Coord;

use crate::map::TileMap;

/// One rasterization hop: at most one tile apart cardinally, at most
/// one terrain level crossed, and the destination must be transparent.
fn can_single_see(map: &TileMap, from: Coord, to: Coord) -> bool {
    if from.taxicab_to(to) > 1 {
        return false;
    }
    if (map.level_at(from) - map.level_at(to)).abs() > 1 {
        return false;
    }
    map.is_transparent(to)
}

/// Whether `origin` has line of sight to `target`.
///
/// Adjacent tiles (and the tile under you) are always visible; beyond
/// that the ray is walked one long-axis tile at a time, checking twice
/// per step when the accumulated slope crosses into a new short-axis
/// tile.
pub fn can_see(map: &TileMap, origin: Coord, target: Coord) -> bool {
    if origin.chebyshev_to(target) <= 1 {
        return true;
    }

    // Work on [x, y] pairs so the short/long axes can be indexed.
    let dist = [
        i64::from(target.x - origin.x),
        i64::from(target.y - origin.y),
    ];
    let short = usize::from(dist[0].abs() > dist[1].abs());
    let long = 1 - short;

    let mut it = [origin.x, origin.y];
    let end = [target.x, target.y];

    // Start at the half-tile; a negative short axis gets nudged one
    // fixed-point unit down so an exactly-half slope crosses tiles on
    // the correct side.
    let mut decimal_short = (i64::from(it[short]) << LOS_SHIFT)
        + LOS_HALF_TILE
        + if dist[short] < 0 { -1 } else { 0 };
    // Floor division to match the arithmetic shift below; truncation
    // would bias negative slopes up by one fixed-point unit.
    let slope = (dist[short] << LOS_SHIFT).div_euclid(dist[long].abs());
    let long_increment = if dist[long] > 0 { 1 } else { -1 };

    let tile = |a: [i32; 2]| Coord::new(a[0], a[1]);

    while it[long] != end[long] {
        let before = it;
        it[long] += long_increment;
        it[short] = (decimal_short >> LOS_SHIFT) as i32;
        if !can_single_see(map, tile(before), tile(it)) {
            return false;
        }

        decimal_short += slope;
        let before = it;
        it[short] = (decimal_short >> LOS_SHIFT) as i32;
        if before[short] != it[short] && !can_single_see(map, tile(before), tile(it)) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use penance_core::coord::{EAST, NORTH};

    #[test]
    fn adjacent_tiles_are_always_visible() {
        let map = TileMap::standard();
        // Even into a wall tile.
        let beside_wall = Coord::new(2, 12);
        assert!(can_see(&map, beside_wall, beside_wall + Coord::new(-1, -1)));
        assert!(can_see(&map, beside_wall, beside_wall));
    }

    #[test]
    fn open_floor_has_sight() {
        let map = TileMap::standard();
        assert!(can_see(&map, Coord::new(5, 22), Coord::new(30, 25)));
        assert!(can_see(&map, Coord::new(20, 5), Coord::new(20, 12)));
    }

    #[test]
    fn hoppers_block_sight() {
        let map = TileMap::standard();
        // The east hopper (R) sits between these two tiles.
        let hopper = Coord::new(30, 15);
        assert_eq!(map.letter_at(hopper), 'R');
        let west = hopper + EAST * -3;
        let east = hopper + EAST * 3;
        assert!(!can_see(&map, west, east));
    }

    #[test]
    fn cannons_do_not_block_sight() {
        let map = TileMap::standard();
        // The west cannon (k) is sight-transparent; a ray along the
        // platform straight across it still connects.
        let cannon = Coord::new(10, 15);
        assert_eq!(map.letter_at(cannon), 'k');
        assert!(can_see(&map, cannon + NORTH, cannon + NORTH * -1));
    }

    #[test]
    fn sight_is_symmetric_on_open_diagonals() {
        let map = TileMap::standard();
        let a = Coord::new(10, 24);
        let b = Coord::new(25, 30);
        assert_eq!(can_see(&map, a, b), can_see(&map, b, a));
    }

    #[test]
    fn walls_block_sight() {
        let map = TileMap::standard();
        // Straight down through the wall segment north of the horn area.
        assert_eq!(map.letter_at(Coord::new(35, 28)), '#');
        assert!(!can_see(&map, Coord::new(35, 27), Coord::new(35, 30)));
    }

    /// Same ray walk, but with the short-axis value recomputed from the
    /// start each step instead of accumulated, so any drift in the
    /// incremental fixed-point arithmetic shows up as a disagreement.
    fn can_see_recomputed(map: &TileMap, origin: Coord, target: Coord) -> bool {
        if origin.chebyshev_to(target) <= 1 {
            return true;
        }

        let dist = [
            i64::from(target.x - origin.x),
            i64::from(target.y - origin.y),
        ];
        let short = usize::from(dist[0].abs() > dist[1].abs());
        let long = 1 - short;

        let mut it = [origin.x, origin.y];
        let end = [target.x, target.y];

        let base = (i64::from(it[short]) << LOS_SHIFT)
            + LOS_HALF_TILE
            + if dist[short] < 0 { -1 } else { 0 };
        let slope = (dist[short] << LOS_SHIFT).div_euclid(dist[long].abs());
        let long_increment = if dist[long] > 0 { 1 } else { -1 };

        let tile = |a: [i32; 2]| Coord::new(a[0], a[1]);

        let mut steps = 0i64;
        while it[long] != end[long] {
            let before = it;
            it[long] += long_increment;
            it[short] = ((base + steps * slope) >> LOS_SHIFT) as i32;
            if !can_single_see(map, tile(before), tile(it)) {
                return false;
            }

            steps += 1;
            let before = it;
            it[short] = ((base + steps * slope) >> LOS_SHIFT) as i32;
            if before[short] != it[short] && !can_single_see(map, tile(before), tile(it)) {
                return false;
            }
        }

        true
    }

    #[test]
    fn shallow_negative_slopes_floor_toward_the_short_axis() {
        let map = TileMap::standard();
        // Slope 14 long to -1 short: the per-step slope is a negative,
        // non-exact fixed-point value, where a truncated (rather than
        // floored) constant samples the wrong short-axis tile.
        for (a, b) in [
            (Coord::new(0, 14), Coord::new(14, 13)),
            (Coord::new(0, 15), Coord::new(14, 12)),
            (Coord::new(14, 13), Coord::new(0, 14)),
            (Coord::new(20, 30), Coord::new(7, 26)),
        ] {
            assert_eq!(
                can_see(&map, a, b),
                can_see_recomputed(&map, a, b),
                "{a:?} -> {b:?}"
            );
        }
    }

    #[test]
    fn incremental_walk_matches_recomputation_everywhere() {
        let map = TileMap::standard();
        for oy in 0..crate::map::MAP_HEIGHT {
            for ox in 0..crate::map::MAP_WIDTH {
                let origin = Coord::new(ox, oy);
                for ty in 0..crate::map::MAP_HEIGHT {
                    for tx in 0..crate::map::MAP_WIDTH {
                        let target = Coord::new(tx, ty);
                        if origin.chebyshev_to(target) > 15 {
                            continue;
                        }
                        assert_eq!(
                            can_see(&map, origin, target),
                            can_see_recomputed(&map, origin, target),
                            "{origin:?} -> {target:?}"
                        );
                    }
                }
            }
        }
    }
}
