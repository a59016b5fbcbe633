//! Runners.
//!
//! Runners ignore players entirely. They march south along a scripted
//! lane, sniff for dropped bait on a fixed sub-schedule of their ten
//! tick cycle, and escape with the eggs if they ever reach the cave row.
//! Eating wrong bait confuses them: they retreat north and their cycle
//! is rewound.

use std::collections::VecDeque;

use penance_core::constants::{RUNNER_ZONE_CLAMP, SNIFF_DISTANCE};
use penance_core::coord::{
    Coord, EAST, NORTH, NORTH_EAST, NORTH_WEST, SOUTH, SOUTH_EAST, SOUTH_WEST, UNDER, WEST,
};
use penance_core::enums::ItemId;
use penance_core::events::SimEvent;
use rand::Rng;

use crate::npc::{Brain, Npc, NpcCtx};
use crate::objects::{Food, Trap};

const TARGET_STATE_COUNT: i32 = 3;
const INITIAL_TARGET_STATE: i32 = -1;
const TILES_PER_WALK: i32 = 5;
const BLUGH_TICKS: i32 = 3;

/// Which target state fires a bait scan on each cycle position 2..=6.
const CYCLE_MAP: [Option<i32>; 7] = [
    None,
    None,
    Some(2),
    Some(3),
    Some(1),
    Some(2),
    Some(3),
];

/// Bait-scan zone preference, east over west, north over south.
const SCAN_ORDER: [Coord; 9] = [
    NORTH_EAST, EAST, SOUTH_EAST, NORTH, UNDER, SOUTH, NORTH_WEST, WEST, SOUTH_WEST,
];

#[derive(Debug, Clone)]
pub struct RunnerBrain {
    /// Counts up through the sniff schedule; zeroed on committing to a
    /// bait and after confusion.
    pub target_state: i32,
    pub followee: Option<ItemId>,
    /// Scripted walk directions consumed before random rolls.
    pub forced_movements: VecDeque<Coord>,
    /// Confusion ticks left after eating wrong bait.
    pub blugh_i: i32,
    pub has_escaped: bool,
}

impl RunnerBrain {
    pub fn new() -> Self {
        Self {
            target_state: INITIAL_TARGET_STATE,
            followee: None,
            forced_movements: VecDeque::new(),
            blugh_i: 0,
            has_escaped: false,
        }
    }
}

impl Default for RunnerBrain {
    fn default() -> Self {
        Self::new()
    }
}

/// One runner tick. `reserves` is the runner reserve counter; an escape
/// puts the runner back into it.
pub fn do_cycle(
    npc: &mut Npc,
    ctx: &mut NpcCtx<'_>,
    food: &mut Vec<Food>,
    traps: &[Trap; 2],
    reserves: &mut u32,
) {
    match npc.cycle {
        1 => {
            if tick_escape(npc, ctx, reserves) {
                return;
            }
            tick_1(npc, ctx, food, traps);
        }
        2..=5 => {
            tick_target(npc, ctx, food);
            tick_eat(npc, ctx, food, traps);
        }
        6 => {
            if tick_escape(npc, ctx, reserves) {
                return;
            }
            tick_6(npc, ctx, food, traps);
        }
        _ => {
            tick_eat(npc, ctx, food, traps);
        }
    }

    npc.step(ctx.map, ctx.block);
}

/// Reaching the cave row ends the run immediately: the runner is gone
/// with the eggs and rejoins the reserve pool.
fn tick_escape(npc: &mut Npc, ctx: &mut NpcCtx<'_>, reserves: &mut u32) -> bool {
    let Brain::Runner(brain) = &mut npc.brain else {
        return false;
    };
    if npc.location.y != ctx.map.landmarks().raa_tile.y {
        return false;
    }
    brain.has_escaped = true;
    npc.alive = false;
    *reserves += 1;
    ctx.log.message("Runner: Raaa!");
    ctx.log.push(SimEvent::RunnerEscaped);
    true
}

fn tick_1(npc: &mut Npc, ctx: &mut NpcCtx<'_>, food: &mut Vec<Food>, traps: &[Trap; 2]) {
    if let Brain::Runner(brain) = &mut npc.brain {
        if brain.blugh_i == 0 {
            brain.target_state += 1;
            if brain.target_state > TARGET_STATE_COUNT {
                brain.target_state = 1;
            }
        } else {
            brain.blugh_i -= 1;
        }
    }

    tick_eat(npc, ctx, food, traps);

    let idle = match &npc.brain {
        Brain::Runner(brain) => brain.blugh_i == 0 && brain.followee.is_none(),
        _ => false,
    };
    if idle {
        npc.stop_destination();
    }
}

fn tick_6(npc: &mut Npc, ctx: &mut NpcCtx<'_>, food: &mut Vec<Food>, traps: &[Trap; 2]) {
    if let Brain::Runner(brain) = &mut npc.brain {
        if brain.blugh_i > 0 {
            brain.blugh_i -= 1;
        }
    }

    tick_target(npc, ctx, food);
    tick_eat(npc, ctx, food, traps);

    let idle = match &npc.brain {
        Brain::Runner(brain) => brain.followee.is_none() && brain.blugh_i == 0,
        _ => false,
    };
    if idle {
        npc.destination = walk(npc, ctx);
    }
}

/// Scan the 8x8 bait zones for something to eat. The runner commits to
/// the newest visible bait in the best zone that has any, but only once
/// some visible bait anywhere in the scan is within sniff range.
fn tick_target(npc: &mut Npc, ctx: &mut NpcCtx<'_>, food: &[Food]) {
    let Brain::Runner(brain) = &mut npc.brain else {
        return;
    };
    let cycle = npc.cycle as usize;
    if cycle >= CYCLE_MAP.len() || CYCLE_MAP[cycle] != Some(brain.target_state) {
        return;
    }

    let zone = npc.location.runner_zone();
    let mut first_food: Option<(ItemId, Coord)> = None;
    for delta in SCAN_ORDER {
        let scan_zone = zone + delta;
        if scan_zone != scan_zone.clamp(UNDER, RUNNER_ZONE_CLAMP) {
            continue;
        }

        for item in food
            .iter()
            .rev()
            .filter(|item| item.location.runner_zone() == scan_zone)
        {
            if !penance_terrain::los::can_see(ctx.map, npc.location, item.location) {
                continue;
            }
            if first_food.is_none() {
                first_food = Some((item.id, item.location));
            }
            if npc.location.chebyshev_to(item.location) <= SNIFF_DISTANCE {
                let (id, location) = first_food.unwrap_or((item.id, item.location));
                brain.target_state = 0;
                brain.followee = Some(id);
                npc.destination = location;
                npc.is_still_static = true;
                return;
            }
        }
    }
}

/// Try to eat the committed bait. Eating happens the tick after the
/// runner lands on it, never the landing tick.
fn tick_eat(npc: &mut Npc, ctx: &mut NpcCtx<'_>, food: &mut Vec<Food>, traps: &[Trap; 2]) {
    let Brain::Runner(brain) = &mut npc.brain else {
        return;
    };
    let Some(target) = brain.followee else {
        return;
    };

    let Some(index) = food.iter().position(|item| item.id == target) else {
        // Somebody picked it up first.
        brain.followee = None;
        brain.target_state = 0;
        npc.destination = npc.location;
        return;
    };

    if npc.location != food[index].location {
        return;
    }

    let mut blugh_destination = None;
    if food[index].is_correct {
        ctx.log.message("Runner: Chomp, chomp.");
        ctx.log.push(SimEvent::RunnerAte { correct: true });
        // Eating on a charged trap is lethal.
        if traps
            .iter()
            .any(|trap| npc.location.chebyshev_to(trap.location) <= 1 && trap.is_charged())
        {
            npc.alive = false;
        }
    } else {
        ctx.log.message("Runner: Blughhhh.");
        ctx.log.push(SimEvent::RunnerAte { correct: false });
        brain.blugh_i = BLUGH_TICKS;
        brain.target_state = 0;
        // Rewind the late cycle positions so the confusion schedule
        // lines up again.
        if npc.cycle > 5 || npc.cycle == 0 {
            npc.cycle -= 5;
        }
        blugh_destination = Some(Coord::new(npc.location.x, ctx.map.landmarks().blugh_row));
    }

    food.remove(index);
    brain.followee = None;
    npc.destination = blugh_destination.unwrap_or(npc.location);
}

/// The scripted lane walk. A handful of redirect tiles funnel runners
/// toward the cave; otherwise they drift five tiles at a time, mostly
/// south, clamped between the trap columns.
fn walk(npc: &mut Npc, ctx: &mut NpcCtx<'_>) -> Coord {
    let lm = ctx.map.landmarks();
    let at = npc.location;

    if at == lm.redirect_1 {
        return lm.destination_1;
    }
    if at.is_southwest_of(lm.redirect_2) && !at.is_southwest_of(lm.redirect_1) {
        return lm.destination_2;
    }
    if at.is_southwest_of(lm.redirect_3) {
        return lm.raa_tile;
    }
    if at.is_southwest_of(lm.redirect_4) {
        return lm.destination_4;
    }

    let direction = match &mut npc.brain {
        Brain::Runner(brain) if !brain.forced_movements.is_empty() => {
            brain.forced_movements.pop_front().unwrap_or(SOUTH)
        }
        _ => match ctx.rng.gen_range(0..6) {
            0 => EAST,
            1 => WEST,
            _ => SOUTH,
        },
    };

    let mut destination = at + direction * TILES_PER_WALK;
    destination.x = destination
        .x
        .clamp((lm.west_trap + WEST).x, lm.east_trap.x);
    destination
}
