//! Hostile units and their per-species brains.
//!
//! One [`Npc`] struct carries everything species share: position, the
//! ten-tick action cycle, hitpoints, despawn bookkeeping, and random
//! walking. What differs per species lives in the [`Brain`] variants and
//! the `do_cycle` functions of the submodules.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use penance_core::constants::DESPAWN_TICKS;
use penance_core::coord::Coord;
use penance_core::enums::{NpcId, Species};
use penance_terrain::path::npc_reactive_step;
use penance_terrain::{BlockGrid, TileMap};

use crate::log::EventLog;

pub mod combat;
pub mod healer;
pub mod runner;

pub use combat::CombatBrain;
pub use healer::HealerBrain;
pub use runner::RunnerBrain;

const CYCLE_COUNT: i32 = 10;
const RANDOM_WALK_CHANCE: u32 = 8;
const RANDOM_WALK_RADIUS: i32 = 5;

const FIGHTER_HITPOINTS: [i32; 10] = [28, 29, 32, 37, 38, 49, 50, 55, 56, 50];
const RANGER_HITPOINTS: [i32; 10] = [20, 28, 29, 34, 41, 50, 50, 54, 58, 50];
const RUNNER_HITPOINTS: [i32; 10] = [5; 10];
const HEALER_HITPOINTS: [i32; 10] = [27, 32, 37, 43, 49, 55, 60, 67, 76, 60];

/// Starting hitpoints for a species on a given wave.
pub fn hitpoints(species: Species, wave_number: usize) -> i32 {
    match species {
        Species::Fighter => FIGHTER_HITPOINTS[wave_number],
        Species::Ranger => RANGER_HITPOINTS[wave_number],
        Species::Runner => RUNNER_HITPOINTS[wave_number],
        Species::Healer => HEALER_HITPOINTS[wave_number],
    }
}

/// Shared tick context for hostile brains.
pub struct NpcCtx<'a> {
    pub map: &'a TileMap,
    pub block: &'a BlockGrid,
    pub rng: &'a mut ChaCha8Rng,
    pub rel_tick: i64,
    pub wave_number: usize,
    pub log: &'a mut EventLog,
}

/// Species-specific state.
#[derive(Debug, Clone)]
pub enum Brain {
    Combat(CombatBrain),
    Runner(RunnerBrain),
    Healer(HealerBrain),
}

/// What the despawn countdown says about a hostile after its tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpcFate {
    Active,
    /// Dead but the corpse still occupies the world.
    Lingering,
    /// The corpse finished despawning and must be removed.
    Remove,
}

#[derive(Debug, Clone)]
pub struct Npc {
    pub id: NpcId,
    pub species: Species,
    pub location: Coord,
    pub destination: Coord,
    /// Position in the ten-tick action cycle. A confused runner can be
    /// rewound below zero; the increment renormalizes it.
    pub cycle: i32,
    pub despawn_i: i32,
    pub alive: bool,
    pub hitpoints: i32,
    /// A hostile that has never walked rolls a die before starting to.
    pub is_still_static: bool,
    /// Ticks left before another random walk may be rolled.
    pub no_random_walk_i: i32,
    pub brain: Brain,
}

impl Npc {
    pub fn new(id: NpcId, species: Species, wave_number: usize, spawn: Coord) -> Self {
        let brain = match species {
            Species::Fighter => Brain::Combat(CombatBrain::fighter()),
            Species::Ranger => Brain::Combat(CombatBrain::ranger()),
            Species::Runner => Brain::Runner(RunnerBrain::new()),
            Species::Healer => Brain::Healer(HealerBrain::new()),
        };
        Self {
            id,
            species,
            location: spawn,
            destination: spawn,
            cycle: 0,
            despawn_i: DESPAWN_TICKS,
            alive: true,
            hitpoints: hitpoints(species, wave_number),
            is_still_static: true,
            no_random_walk_i: 0,
            brain,
        }
    }

    /// Advance the action cycle. Runs every tick, dead or alive.
    pub fn begin_cycle(&mut self) {
        self.cycle = (self.cycle + 1).rem_euclid(CYCLE_COUNT);
    }

    /// Lethal damage is applied by brains and players; the state flip
    /// happens once per tick, after the brain has acted.
    pub fn settle_death(&mut self) {
        if self.alive && self.hitpoints <= 0 {
            self.hitpoints = 0;
            self.alive = false;
        }
    }

    /// Count down the corpse. Call exactly once per tick.
    pub fn tick_despawn(&mut self) -> NpcFate {
        if self.alive {
            return NpcFate::Active;
        }
        self.despawn_i -= 1;
        if self.despawn_i == -1 {
            NpcFate::Remove
        } else {
            NpcFate::Lingering
        }
    }

    /// Maybe pick a new idle wander destination. A hostile that has
    /// already wandered re-rolls freely; one that has been static since
    /// spawning or since it last followed something starts wandering
    /// only on a one-in-eight roll.
    pub fn set_random_walk_destination(&mut self, rng: &mut ChaCha8Rng) {
        if self.no_random_walk_i > 0 {
            return;
        }

        self.destination = self.location;
        if !self.is_still_static || rng.gen_range(0..RANDOM_WALK_CHANCE) == 0 {
            self.destination = self.location
                + Coord::new(
                    rng.gen_range(-RANDOM_WALK_RADIUS..=RANDOM_WALK_RADIUS),
                    rng.gen_range(-RANDOM_WALK_RADIUS..=RANDOM_WALK_RADIUS),
                );
            self.is_still_static = false;
            self.no_random_walk_i = self.location.chebyshev_to(self.destination).max(2);
        }
    }

    /// One reactive step toward the destination.
    pub fn step(&mut self, map: &TileMap, block: &BlockGrid) {
        if self.no_random_walk_i > 0 {
            self.no_random_walk_i -= 1;
        }
        self.location = npc_reactive_step(map, block, self.location, self.destination);
    }

    /// Stop pathing, optionally also at the current tile.
    pub fn stop_destination(&mut self) {
        self.destination = self.location;
    }
}

/// Aim a hostile at an adjacent tile of a unit target. Standing under
/// the target escapes through a random cardinal first.
pub fn follow_beside(npc: &mut Npc, target: Coord, rng: &mut ChaCha8Rng) {
    let escape = if npc.location == target {
        penance_core::coord::CARDINALS[rng.gen_range(0..4)]
    } else {
        penance_core::coord::UNDER
    };
    npc.destination = crate::unit::follow_destination(npc.location, target, crate::unit::BESIDE, escape);
    npc.is_still_static = true;
}

/// Pick a random target among `candidates` the actor can see within
/// `radius`, returning its index.
pub fn choose_visible<T>(
    rng: &mut ChaCha8Rng,
    map: &TileMap,
    from: Coord,
    radius: i32,
    candidates: impl Iterator<Item = (T, Coord)>,
) -> Option<T> {
    let mut visible: Vec<T> = candidates
        .filter(|&(_, location)| {
            from.chebyshev_to(location) <= radius
                && penance_terrain::los::can_see(map, from, location)
        })
        .map(|(key, _)| key)
        .collect();
    if visible.is_empty() {
        None
    } else {
        let index = rng.gen_range(0..visible.len());
        Some(visible.swap_remove(index))
    }
}
