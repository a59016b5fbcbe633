//! The arena layout and its named landmarks.
//!
//! The map is a character grid. Each letter encodes both the tile's
//! terrain class and, for a handful of unique letters, a landmark the
//! game logic needs to find (spawns, traps, dispensers, runner script
//! tiles). Landmarks are resolved once at construction.

use penance_core::coord::{Coord, NORTH};
use penance_core::enums::{Role, Side, Species};

// Terrain legend:
//   '#' '$'      walls and out-of-map filler
//   '·'          open floor
//   '.'          ramp tiles (level 1)
//   '^'          cannon platform (level 2)
//   'K' 'k'      east / west cannon, 'R' 'r' east / west hopper
//   'T' 't'      east / west trap
//   'q' 'w' 'e' 'y'  attacker / defender / healer / collector dispensers
//   'A' 'S' 'H' 'D'  fighter / ranger / healer / runner spawns
//   'a' 's' 'h' 'c' 'd'  player spawns
//   'm' 'L' 'l'  hammer and logs spawns
//   'B' '1'-'7'  runner scripting tiles
//   'M' 'o' 'O' 'z' 'X' 'P'  miscellaneous markers
const LAYOUT: [&str; 37] = [
    "#################$$$$$#################",
    "###########$###$$$···$$$###$###########",
    "#####$###$$$·A···l·······D·$$$###$#####",
    "####$$············L··············$$####",
    "####$··S·······················H··$$###",
    "###$$······························$###",
    "##$$····················M··········$###",
    "##$··················m·············$$##",
    "##$·······o·························$$#",
    "##$··································$#",
    "#$$··································$#",
    "$$··································$$#",
    "$···································$##",
    "$···································$##",
    "$$······#^^^#··············#^^^#····$$#",
    "#$$·····^^kr^··············^^KR^··T··$$",
    "##$·t···^^^^^··············^^^^^······$",
    "#$$·····#^^^#··············#^^^#······$",
    "#$·······^^^················^^^·······$",
    "#$·······^^^····O···········^^^z······$",
    "#$·······...················...·······$",
    "#$····································$",
    "#$····································$",
    "#$····································$",
    "#$····································$",
    "#$$···································$",
    "##$$·································#$",
    "###$································##$",
    "###$·······························##$#",
    "###$$·····························.^^^#",
    "####$$····························.^^^#",
    "#####$··············a·············.^^^#",
    "#####$$·········2··s·h············.^^^#",
    "######$$$$X····5··c673d···········4####",
    "#########$$$$·1PP··········$$$$$$$$$$$#",
    "############$$·PP··B··qwey$$###########",
    "#############$$$$$####$$$$$############",
];

const NOT_WALKABLE: &str = "#qweyKkRrPX$";
const NOT_TRANSPARENT: &str = "#qweyRr";
const HIGH_LEVEL: &str = "^KkRr";

pub const MAP_WIDTH: i32 = 39;
pub const MAP_HEIGHT: i32 = 37;

/// Every tile the game logic addresses by name rather than by letter.
#[derive(Debug, Clone)]
pub struct Landmarks {
    pub fighter_spawn: Coord,
    pub ranger_spawn: Coord,
    pub penance_healer_spawn: Coord,
    pub runner_spawn: Coord,
    player_spawns: [Coord; 5],
    dispensers: [Coord; 4],
    pub hammer_spawn: Coord,
    pub logs_spawn: Coord,
    pub far_logs_spawn: Coord,
    pub east_trap: Coord,
    pub west_trap: Coord,
    /// Crossing this row (y match) lets a runner escape with the eggs.
    pub raa_tile: Coord,
    /// A confused runner retreats to this row, four tiles north of the traps.
    pub blugh_row: i32,
    // Runner walk script. Redirects are compared against the runner's
    // location, destinations are where it then heads.
    pub redirect_1: Coord,
    pub redirect_2: Coord,
    pub redirect_3: Coord,
    pub redirect_4: Coord,
    pub destination_1: Coord,
    pub destination_2: Coord,
    pub destination_4: Coord,
}

impl Landmarks {
    pub fn npc_spawn(&self, species: Species) -> Coord {
        match species {
            Species::Fighter => self.fighter_spawn,
            Species::Ranger => self.ranger_spawn,
            Species::Runner => self.runner_spawn,
            Species::Healer => self.penance_healer_spawn,
        }
    }

    pub fn player_spawn(&self, role: Role) -> Coord {
        self.player_spawns[role as usize]
    }

    /// Both attackers share the attacker dispenser.
    pub fn dispenser(&self, role: Role) -> Coord {
        match role {
            Role::MainAttacker | Role::SecondAttacker => self.dispensers[0],
            Role::Defender => self.dispensers[1],
            Role::Healer => self.dispensers[2],
            Role::Collector => self.dispensers[3],
        }
    }

    pub fn trap(&self, side: Side) -> Coord {
        match side {
            Side::East => self.east_trap,
            Side::West => self.west_trap,
        }
    }
}

/// The static arena grid. Landmarks are resolved once at construction;
/// player blocking lives in a separate overlay, not here.
#[derive(Debug, Clone)]
pub struct TileMap {
    rows: Vec<Vec<char>>,
    landmarks: Landmarks,
}

impl TileMap {
    /// The one arena this game is played in.
    pub fn standard() -> Self {
        let rows: Vec<Vec<char>> = LAYOUT.iter().map(|row| row.chars().collect()).collect();
        let find = |letter: char| -> Coord {
            for (y, row) in rows.iter().enumerate() {
                if let Some(x) = row.iter().position(|&c| c == letter) {
                    return Coord::new(x as i32, y as i32);
                }
            }
            unreachable!("layout is missing landmark {letter:?}")
        };

        let east_trap = find('T');
        let landmarks = Landmarks {
            fighter_spawn: find('A'),
            ranger_spawn: find('S'),
            penance_healer_spawn: find('H'),
            runner_spawn: find('D'),
            player_spawns: [find('a'), find('s'), find('h'), find('c'), find('d')],
            dispensers: [find('q'), find('w'), find('e'), find('y')],
            hammer_spawn: find('m'),
            logs_spawn: find('L'),
            far_logs_spawn: find('l'),
            east_trap,
            west_trap: find('t'),
            raa_tile: find('B'),
            blugh_row: (east_trap + NORTH * 4).y,
            redirect_1: find('1'),
            redirect_2: find('2'),
            redirect_3: find('3'),
            redirect_4: find('4'),
            destination_1: find('5'),
            destination_2: find('6'),
            destination_4: find('7'),
        };
        Self { rows, landmarks }
    }

    pub fn landmarks(&self) -> &Landmarks {
        &self.landmarks
    }

    /// Raw grid rows, for rendering.
    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    /// Letter at a tile. Anything at or beyond the border reads as wall.
    pub fn letter_at(&self, tile: Coord) -> char {
        if 0 < tile.x && tile.x < MAP_WIDTH && 0 < tile.y && tile.y < MAP_HEIGHT {
            self.rows[tile.y as usize][tile.x as usize]
        } else {
            '#'
        }
    }

    pub fn is_walkable(&self, tile: Coord) -> bool {
        !NOT_WALKABLE.contains(self.letter_at(tile))
    }

    pub fn is_transparent(&self, tile: Coord) -> bool {
        !NOT_TRANSPARENT.contains(self.letter_at(tile))
    }

    /// Terrain height class. Cannon platforms are 2, the ramp tiles
    /// beside them are 1, everything else is 0. A single step or sight
    /// line can cross at most one level.
    pub fn level_at(&self, tile: Coord) -> i32 {
        let letter = self.letter_at(tile);
        if HIGH_LEVEL.contains(letter) {
            2
        } else if letter == '.' {
            1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_rectangular() {
        for row in LAYOUT {
            assert_eq!(row.chars().count(), MAP_WIDTH as usize);
        }
        assert_eq!(LAYOUT.len(), MAP_HEIGHT as usize);
    }

    #[test]
    fn out_of_bounds_reads_as_wall() {
        let map = TileMap::standard();
        assert_eq!(map.letter_at(Coord::new(-1, 5)), '#');
        assert_eq!(map.letter_at(Coord::new(5, 100)), '#');
        assert_eq!(map.letter_at(Coord::new(0, 0)), '#');
    }

    #[test]
    fn landmarks_resolve() {
        let map = TileMap::standard();
        let lm = map.landmarks();
        assert_eq!(lm.fighter_spawn, Coord::new(13, 2));
        assert_eq!(lm.runner_spawn, Coord::new(25, 2));
        assert_eq!(lm.east_trap, Coord::new(34, 15));
        assert_eq!(lm.west_trap, Coord::new(4, 16));
        assert_eq!(lm.blugh_row, 11);
        assert_eq!(lm.player_spawn(Role::MainAttacker), Coord::new(20, 31));
        assert_eq!(lm.dispenser(Role::SecondAttacker), lm.dispenser(Role::MainAttacker));
    }

    #[test]
    fn levels() {
        let map = TileMap::standard();
        // Cannon platform and its ramp.
        assert_eq!(map.level_at(Coord::new(10, 15)), 2);
        assert_eq!(map.level_at(Coord::new(9, 20)), 1);
        assert_eq!(map.level_at(Coord::new(10, 10)), 0);
    }

    #[test]
    fn walkability_classes() {
        let map = TileMap::standard();
        let lm = map.landmarks();
        // Dispensers and hoppers are solid, platforms are not walkable.
        assert!(!map.is_walkable(lm.dispenser(Role::Defender)));
        assert!(!map.is_walkable(Coord::new(10, 15)));
        assert!(map.is_walkable(lm.east_trap));
        // Cannons block walking but not sight.
        assert!(map.is_transparent(Coord::new(10, 15)));
        assert!(!map.is_transparent(lm.dispenser(Role::Healer)));
    }
}
