//! Follow and action-range rules shared by players and hostiles.
//!
//! A unit follows a target either "beside" it (any adjacent tile, with
//! or without the tile underneath) or at a fixed offset (items are acted
//! on from their exact tile, dispensers from the tile north of them).

use penance_core::coord::Coord;
use penance_terrain::los::can_see;
use penance_terrain::TileMap;

/// How a followed target wants to be approached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowKind {
    Beside { allow_under: bool },
    Offset(Coord),
}

/// Units and traps. Traps may be worked on from underneath.
pub const BESIDE: FollowKind = FollowKind::Beside { allow_under: false };
pub const BESIDE_OR_UNDER: FollowKind = FollowKind::Beside { allow_under: true };

/// Where to stand to act on a target. `escape` is the direction used to
/// get out from under a target that cannot be acted on from underneath;
/// players always escape west, hostiles pick a random cardinal.
pub fn follow_destination(actor: Coord, target: Coord, kind: FollowKind, escape: Coord) -> Coord {
    match kind {
        FollowKind::Beside { allow_under } => {
            if !allow_under && actor == target {
                target + escape
            } else {
                target + (actor - target).single_step_taxicab()
            }
        }
        FollowKind::Offset(offset) => target + offset,
    }
}

/// Whether `actor` can act on a target right now. Beside targets need
/// adjacency and sight; offset targets need the exact tile and nothing
/// else.
pub fn can_act_on(map: &TileMap, actor: Coord, target: Coord, kind: FollowKind) -> bool {
    match kind {
        FollowKind::Beside { allow_under: true } => {
            actor.taxicab_to(target) <= 1 && can_see(map, actor, target)
        }
        FollowKind::Beside { allow_under: false } => {
            actor.taxicab_to(target) == 1 && can_see(map, actor, target)
        }
        FollowKind::Offset(offset) => target + offset == actor,
    }
}

/// The ranged variant: anywhere within `range` tiles except underneath,
/// with sight.
pub fn can_act_at_range(map: &TileMap, actor: Coord, target: Coord, range: i32) -> bool {
    let distance = actor.chebyshev_to(target);
    0 < distance && distance <= range && can_see(map, actor, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use penance_core::coord::{EAST, NORTH, WEST};

    #[test]
    fn beside_approach_steps_off_the_dominant_axis() {
        let target = Coord::new(20, 20);
        let actor = Coord::new(24, 21);
        // x dominates, so the approach tile is east of the target.
        assert_eq!(follow_destination(actor, target, BESIDE, WEST), target + EAST);
    }

    #[test]
    fn under_a_no_under_target_escapes() {
        let target = Coord::new(20, 20);
        assert_eq!(follow_destination(target, target, BESIDE, WEST), target + WEST);
    }

    #[test]
    fn under_an_allow_under_target_stays() {
        let target = Coord::new(20, 20);
        assert_eq!(
            follow_destination(target, target, BESIDE_OR_UNDER, WEST),
            target
        );
    }

    #[test]
    fn offset_targets_need_the_exact_tile() {
        let map = TileMap::standard();
        let dispenser = map.landmarks().dispenser(penance_core::enums::Role::Defender);
        let spot = dispenser + NORTH;
        assert!(can_act_on(&map, spot, dispenser, FollowKind::Offset(NORTH)));
        assert!(!can_act_on(&map, spot + EAST, dispenser, FollowKind::Offset(NORTH)));
    }

    #[test]
    fn ranged_acting_excludes_underneath() {
        let map = TileMap::standard();
        let target = Coord::new(20, 22);
        assert!(!can_act_at_range(&map, target, target, 5));
        assert!(can_act_at_range(&map, target + EAST * 5, target, 5));
        assert!(!can_act_at_range(&map, target + EAST * 6, target, 5));
    }
}
