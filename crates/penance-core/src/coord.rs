//! Integer tile coordinates and direction vectors.
//!
//! The map is a small 2D grid; every location, displacement, and direction
//! is a pair of `i32`s. Distances come in two flavors: Chebyshev (king
//! moves) for ranges and render distances, taxicab (rook moves) for
//! adjacency and path-length accounting.

use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A tile location or displacement on the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

/// The zero vector; also "under the target" as a follow offset.
pub const UNDER: Coord = Coord { x: 0, y: 0 };
pub const NORTH: Coord = Coord { x: 0, y: -1 };
pub const SOUTH: Coord = Coord { x: 0, y: 1 };
pub const WEST: Coord = Coord { x: -1, y: 0 };
pub const EAST: Coord = Coord { x: 1, y: 0 };
pub const SOUTH_EAST: Coord = Coord { x: 1, y: 1 };
pub const SOUTH_WEST: Coord = Coord { x: -1, y: 1 };
pub const NORTH_EAST: Coord = Coord { x: 1, y: -1 };
pub const NORTH_WEST: Coord = Coord { x: -1, y: -1 };

/// The four cardinal directions, in the order a unit prefers to sidestep.
pub const CARDINALS: [Coord; 4] = [WEST, EAST, SOUTH, NORTH];

/// Neighbor expansion order for breadth-first pathing. The game prefers
/// west, east, south, north, then the diagonals; changing this order
/// changes which of several equal-length paths wins.
pub const BFS_NEIGHBOR_ORDER: [Coord; 8] = [
    WEST, EAST, SOUTH, NORTH, SOUTH_WEST, SOUTH_EAST, NORTH_WEST, NORTH_EAST,
];

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// King-move distance (chess king / queen step count).
    pub fn chebyshev_to(self, other: Coord) -> i32 {
        let d = self - other;
        d.x.abs().max(d.y.abs())
    }

    /// Rook-move distance (sum of axis offsets).
    pub fn taxicab_to(self, other: Coord) -> i32 {
        let d = self - other;
        d.x.abs() + d.y.abs()
    }

    /// Unit step along x toward the direction of this displacement.
    pub fn single_step_x(self) -> Coord {
        match self.x.signum() {
            1 => EAST,
            -1 => WEST,
            _ => UNDER,
        }
    }

    /// Unit step along y toward the direction of this displacement.
    pub fn single_step_y(self) -> Coord {
        match self.y.signum() {
            1 => SOUTH,
            -1 => NORTH,
            _ => UNDER,
        }
    }

    /// Combined unit step (diagonal when both axes are nonzero).
    pub fn single_step(self) -> Coord {
        self.single_step_x() + self.single_step_y()
    }

    /// Unit step along the dominant axis only, preferring y on ties.
    pub fn single_step_taxicab(self) -> Coord {
        if self.x.abs() <= self.y.abs() {
            self.single_step_y()
        } else {
            self.single_step_x()
        }
    }

    /// True when both axis magnitudes are at most `range` (inclusive).
    pub fn within(self, range: i32) -> bool {
        self.x.abs() <= range && self.y.abs() <= range
    }

    /// True when this tile is at or west of `other` and at or south of it.
    /// Holds on equality. Used by the runner redirect script.
    pub fn is_southwest_of(self, other: Coord) -> bool {
        self.x <= other.x && self.y >= other.y
    }

    /// Component-wise clamp between `floor` and `ceil` (both inclusive).
    pub fn clamp(self, floor: Coord, ceil: Coord) -> Coord {
        Coord {
            x: self.x.clamp(floor.x, ceil.x),
            y: self.y.clamp(floor.y, ceil.y),
        }
    }

    /// The 8x8 bait-scan zone this tile belongs to.
    pub fn runner_zone(self) -> Coord {
        let rel = self - crate::constants::RUNNER_ZONE_EDGE;
        Coord {
            x: rel.x.div_euclid(crate::constants::RUNNER_ZONE_DIM),
            y: rel.y.div_euclid(crate::constants::RUNNER_ZONE_DIM),
        }
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Coord {
    fn add_assign(&mut self, rhs: Coord) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Coord {
    type Output = Coord;

    fn mul(self, rhs: i32) -> Coord {
        Coord::new(self.x * rhs, self.y * rhs)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:>2}, {:>2})", self.x, self.y)
    }
}
