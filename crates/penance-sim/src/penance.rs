//! The hostile side of a wave: the four species rosters, their spawn
//! caps and reserves, and the per-tick species loop.

use std::collections::VecDeque;

use penance_core::constants::{CYCLE_TICKS, DUE_TO_SPAWN_TICKS};
use penance_core::coord::Coord;
use penance_core::enums::Species;
use penance_core::events::{tick_to_string, SimEvent};

use crate::deferred::DeferredAction;
use crate::engine::IdAlloc;
use crate::npc::{combat, healer, runner, Npc, NpcCtx, NpcFate};
use crate::objects::{Food, Trap};
use crate::players::Players;

/// (cap, reserves) per wave, indexed by wave number.
const FIGHTER_SPAWNS: [(u32, u32); 10] = [
    (2, 2), (2, 3), (5, 0), (5, 1), (3, 3), (5, 1), (5, 2), (7, 0), (6, 2), (5, 2),
];
const RANGER_SPAWNS: [(u32, u32); 10] = [
    (2, 2), (3, 1), (3, 3), (3, 3), (5, 1), (5, 2), (6, 1), (5, 3), (7, 1), (6, 1),
];
const RUNNER_SPAWNS: [(u32, u32); 10] = [
    (2, 0), (2, 1), (2, 2), (3, 1), (4, 1), (4, 2), (5, 1), (5, 2), (6, 2), (5, 1),
];
const HEALER_SPAWNS: [(u32, u32); 10] = [
    (2, 0), (3, 0), (2, 1), (3, 1), (4, 1), (4, 2), (4, 3), (5, 2), (6, 2), (4, 3),
];

fn base_spawns(species: Species, wave_number: usize) -> (u32, u32) {
    match species {
        Species::Fighter => FIGHTER_SPAWNS[wave_number],
        Species::Ranger => RANGER_SPAWNS[wave_number],
        Species::Runner => RUNNER_SPAWNS[wave_number],
        Species::Healer => HEALER_SPAWNS[wave_number],
    }
}

/// Per-species spawn bookkeeping. `cap` is the saturation limit, how
/// many may be present at once; `reserves` counts down as they spawn.
#[derive(Debug, Clone)]
pub struct SpawnState {
    pub cap: u32,
    pub reserves: u32,
}

#[derive(Debug)]
pub struct Penance {
    pub fighters: Vec<Npc>,
    pub rangers: Vec<Npc>,
    pub runners: Vec<Npc>,
    pub healers: Vec<Npc>,
    spawns: [SpawnState; 4],
    due_to_spawn: [bool; 4],
    extinct: [bool; 4],
    /// Scripted walk directions, one queue per runner in spawn order.
    pub runner_movements: VecDeque<VecDeque<Coord>>,
}

impl Penance {
    pub fn new(wave_number: usize) -> Self {
        // Until a species first spawns, its whole roster sits in the
        // reserve pool.
        let spawns = Species::ALL.map(|species| {
            let (cap, reserves) = base_spawns(species, wave_number);
            SpawnState {
                cap,
                reserves: reserves + cap,
            }
        });
        Self {
            fighters: Vec::new(),
            rangers: Vec::new(),
            runners: Vec::new(),
            healers: Vec::new(),
            spawns,
            due_to_spawn: [false; 4],
            extinct: [false; 4],
            runner_movements: VecDeque::new(),
        }
    }

    pub fn roster(&self, species: Species) -> &[Npc] {
        match species {
            Species::Fighter => &self.fighters,
            Species::Ranger => &self.rangers,
            Species::Runner => &self.runners,
            Species::Healer => &self.healers,
        }
    }

    pub fn roster_mut(&mut self, species: Species) -> &mut Vec<Npc> {
        match species {
            Species::Fighter => &mut self.fighters,
            Species::Ranger => &mut self.rangers,
            Species::Runner => &mut self.runners,
            Species::Healer => &mut self.healers,
        }
    }

    pub fn npc_mut(&mut self, id: penance_core::enums::NpcId) -> Option<&mut Npc> {
        self.fighters
            .iter_mut()
            .chain(self.rangers.iter_mut())
            .chain(self.runners.iter_mut())
            .chain(self.healers.iter_mut())
            .find(|npc| npc.id == id)
    }

    pub fn count_present(&self) -> usize {
        Species::ALL
            .iter()
            .map(|&species| self.roster(species).len())
            .sum()
    }

    pub fn count_reserves(&self) -> u32 {
        self.spawns.iter().map(|spawn| spawn.reserves).sum()
    }

    pub fn reserves(&self, species: Species) -> u32 {
        self.spawns[species.index()].reserves
    }

    /// One hostile tick for every species, in fixed order, then spawn
    /// scheduling. Returns whether any hostile is still present or in
    /// reserve.
    pub fn tick(
        &mut self,
        ctx: &mut NpcCtx<'_>,
        players: &Players,
        food: &mut Vec<Food>,
        traps: &mut [Trap; 2],
        stall: &mut VecDeque<DeferredAction>,
    ) -> bool {
        let Penance {
            fighters,
            rangers,
            runners,
            healers,
            spawns,
            due_to_spawn,
            extinct,
            ..
        } = self;

        for (list, species) in [(fighters, Species::Fighter), (rangers, Species::Ranger)] {
            let mut i = 0;
            while i < list.len() {
                list[i].begin_cycle();
                if list[i].alive {
                    combat::do_cycle(&mut list[i], ctx, players);
                }
                if !settle(list, i, species, spawns, due_to_spawn, extinct, traps, ctx) {
                    i += 1;
                }
            }
        }

        {
            let mut i = 0;
            while i < runners.len() {
                runners[i].begin_cycle();
                if runners[i].alive {
                    runner::do_cycle(
                        &mut runners[i],
                        ctx,
                        food,
                        traps,
                        &mut spawns[Species::Runner.index()].reserves,
                    );
                }
                if !settle(
                    runners,
                    i,
                    Species::Runner,
                    spawns,
                    due_to_spawn,
                    extinct,
                    traps,
                    ctx,
                ) {
                    i += 1;
                }
            }
        }

        {
            let mut i = 0;
            while i < healers.len() {
                healers[i].begin_cycle();
                if healers[i].alive {
                    healer::do_cycle(&mut healers[i], ctx, players, runners);
                }
                if !settle(
                    healers,
                    i,
                    Species::Healer,
                    spawns,
                    due_to_spawn,
                    extinct,
                    traps,
                    ctx,
                ) {
                    i += 1;
                }
            }
        }

        // Spawning runs after deaths so a slot freed this tick can be
        // refilled on the same cycle boundary. The spawn itself lands a
        // tick later through the deferral queue.
        if ctx.rel_tick % CYCLE_TICKS == 0 && ctx.rel_tick > 0 {
            for species in Species::ALL {
                let index = species.index();
                let present = self.roster(species).len();
                let spawn = &mut self.spawns[index];
                let can_spawn = self.due_to_spawn[index] || present < spawn.cap as usize;
                if spawn.reserves > 0 && can_spawn {
                    spawn.reserves -= 1;
                    stall.push_back(DeferredAction::SpawnSpecies(species));
                }
            }
        }

        self.count_present() > 0 || self.count_reserves() > 0
    }

    /// Materialize one hostile at its spawn tile. Runs from the
    /// deferral queue, never directly from the spawn scheduler.
    pub fn spawn(&mut self, species: Species, ctx: &mut NpcCtx<'_>, ids: &mut IdAlloc) {
        let spawn_tile = ctx.map.landmarks().npc_spawn(species);
        let mut npc = Npc::new(ids.next_npc(), species, ctx.wave_number, spawn_tile);
        self.due_to_spawn[species.index()] = false;
        if let crate::npc::Brain::Runner(brain) = &mut npc.brain {
            if let Some(movements) = self.runner_movements.pop_front() {
                brain.forced_movements = movements;
            }
        }
        ctx.log.message(format!(
            "Wave {}: A new {species} has spawned ({}).",
            ctx.wave_number,
            tick_to_string(ctx.rel_tick)
        ));
        ctx.log.push(SimEvent::NpcSpawned { species });
        self.roster_mut(species).push(npc);
    }
}

/// Post-brain bookkeeping for one hostile: death settling, the despawn
/// countdown, respawn dueness, extinction, and removal. Returns whether
/// the hostile was removed from its roster.
fn settle(
    list: &mut Vec<Npc>,
    i: usize,
    species: Species,
    spawns: &[SpawnState; 4],
    due_to_spawn: &mut [bool; 4],
    extinct: &mut [bool; 4],
    traps: &mut [Trap; 2],
    ctx: &mut NpcCtx<'_>,
) -> bool {
    list[i].settle_death();
    let fate = list[i].tick_despawn();

    let index = species.index();
    if !list[i].alive && list[i].despawn_i < DUE_TO_SPAWN_TICKS[index] {
        due_to_spawn[index] = true;
        let none_alive = list.iter().all(|npc| !npc.alive);
        if none_alive && spawns[index].reserves == 0 && !extinct[index] {
            extinct[index] = true;
            ctx.log.message(format!(
                "Wave {}: All penance {species}s have been killed ({}).",
                ctx.wave_number,
                tick_to_string(ctx.rel_tick)
            ));
            ctx.log.push(SimEvent::SpeciesExtinct { species });
        }
    }

    if fate != NpcFate::Remove {
        return false;
    }

    let npc = list.remove(i);
    // A dying runner springs any charged trap beside it.
    if species == Species::Runner {
        for trap in traps.iter_mut() {
            if npc.location.chebyshev_to(trap.location) <= 1 && trap.charges > 0 {
                trap.charges -= 1;
            }
        }
    }
    let escaped = matches!(
        &npc.brain,
        crate::npc::Brain::Runner(brain) if brain.has_escaped
    );
    if !escaped {
        ctx.log.message(format!(
            "Wave {}: {species} death animation finished ({}).",
            ctx.wave_number,
            tick_to_string(ctx.rel_tick)
        ));
    }
    ctx.log.push(SimEvent::NpcDied { species });
    true
}
