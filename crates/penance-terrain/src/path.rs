//! Both pathfinding flavors.
//!
//! Players plan a full route up front with a breadth-first search;
//! hostiles re-derive a single greedy step every tick and so flow
//! around moving players instead of committing to a route.

use std::collections::{HashMap, HashSet, VecDeque};

use penance_core::constants::BFS_NODE_LIMIT;
use penance_core::coord::{Coord, BFS_NEIGHBOR_ORDER, UNDER};

use crate::block::BlockGrid;
use crate::map::TileMap;
use crate::step::{can_npc_step, can_step};

/// Breadth-first path from `start` to `destination`, exclusive of
/// `start`. If the destination is unreachable or the node budget runs
/// out, the path leads to the visited tile closest to it by taxicab
/// distance. Neighbor expansion order decides which of several
/// equal-length routes wins.
pub fn bfs_path(map: &TileMap, start: Coord, destination: Coord) -> Vec<Coord> {
    let mut parents: HashMap<Coord, Coord> = HashMap::new();
    let mut visited: HashSet<Coord> = HashSet::new();
    let mut queue: VecDeque<Coord> = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    let mut closest = start;
    let mut closest_distance = start.taxicab_to(destination);
    let mut pops = 0;

    let end = 'search: loop {
        let Some(vertex) = queue.pop_front() else {
            break closest;
        };
        let distance = vertex.taxicab_to(destination);
        if distance < closest_distance {
            closest_distance = distance;
            closest = vertex;
        }

        for direction in BFS_NEIGHBOR_ORDER {
            let tile = vertex + direction;
            if can_step(map, vertex, tile) && !visited.contains(&tile) {
                parents.insert(tile, vertex);
                if tile == destination {
                    break 'search tile;
                }
                visited.insert(tile);
                queue.push_back(tile);
            }
        }

        pops += 1;
        if pops == BFS_NODE_LIMIT {
            break closest;
        }
    };

    let mut path = Vec::new();
    let mut cursor = end;
    while cursor != start {
        path.push(cursor);
        match parents.get(&cursor) {
            Some(&parent) => cursor = parent,
            None => break,
        }
    }
    path.reverse();
    path
}

/// One reactive step for a hostile: the diagonal toward `destination`
/// first, then the x component alone, then the y component alone. The
/// current location is returned when every option is blocked.
pub fn npc_reactive_step(
    map: &TileMap,
    block: &BlockGrid,
    location: Coord,
    destination: Coord,
) -> Coord {
    let relative = destination - location;
    let step_x = relative.single_step_x();
    let step_y = relative.single_step_y();

    for step in [step_x + step_y, step_x, step_y] {
        if step != UNDER && can_npc_step(map, block, location, location + step) {
            return location + step;
        }
    }
    location
}
