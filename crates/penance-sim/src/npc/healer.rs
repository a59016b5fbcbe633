//! Penance healers.
//!
//! A healer alternates between chasing a player to poison-touch and
//! chasing a runner to heal, switching state each time it reaches one.
//! The poison counters start in a state that produces a harmless zero
//! hitsplat shortly after spawn, and keeps every later poison dose
//! synced to the same five-tick beat.

use penance_core::constants::{
    ACTION_DISTANCE, POISON_DOSE, POISON_HIT, POISON_TICKS, SNIFF_DISTANCE,
};
use penance_core::enums::{NpcId, Role, Species};

use crate::npc::{choose_visible, follow_beside, Brain, Npc, NpcCtx};
use crate::players::Players;
use crate::unit::{can_act_on, BESIDE};

const TARGET_STATE_COUNT: usize = 2;
const TARGETING_PLAYER: usize = 0;
const TARGETING_RUNNER: usize = 1;
/// Recovery ticks after reaching a target, indexed by the new state.
const NO_FOLLOW_DELAYS: [i32; 2] = [2, 4];

/// What the healer is currently walking toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealTarget {
    Player(Role),
    Runner(NpcId),
}

#[derive(Debug, Clone)]
pub struct HealerBrain {
    pub target_state: usize,
    pub followee: Option<HealTarget>,
    /// Never followed anything yet; such a healer does not wander.
    pub in_initial_state: bool,
    /// Remaining poison counter. Starts at 1 so the first five-tick
    /// boundary after spawn shows a zero hitsplat.
    pub poison_i: i32,
    pub poison_start_tick: i64,
    pub no_follow_i: i32,
}

impl HealerBrain {
    pub fn new() -> Self {
        Self {
            target_state: TARGETING_PLAYER,
            followee: None,
            in_initial_state: true,
            poison_i: 1,
            poison_start_tick: 0,
            no_follow_i: 0,
        }
    }

    pub fn is_poisoned(&self) -> bool {
        self.poison_i > 0
    }

    fn poison_damage(&self) -> i32 {
        let ticks = POISON_TICKS as i32;
        (self.poison_i + ticks - 1) / ticks
    }
}

impl Default for HealerBrain {
    fn default() -> Self {
        Self::new()
    }
}

/// A fresh dose from poisoned bait. Re-poisoning keeps the original
/// five-tick beat and just tops the counter back up.
pub fn apply_poison(npc: &mut Npc, rel_tick: i64) {
    let Brain::Healer(brain) = &mut npc.brain else {
        return;
    };
    if !brain.is_poisoned() {
        brain.poison_start_tick = rel_tick;
    }
    brain.poison_i = POISON_DOSE;
    npc.hitpoints -= POISON_HIT;
}

pub fn do_cycle(npc: &mut Npc, ctx: &mut NpcCtx<'_>, players: &Players, runners: &mut [Npc]) {
    tick_poison(npc, ctx);

    let (mut followee, mut in_initial_state, mut no_follow_i, target_state) = match &npc.brain {
        Brain::Healer(brain) => (
            brain.followee,
            brain.in_initial_state,
            brain.no_follow_i,
            brain.target_state,
        ),
        _ => return,
    };

    // Keep chasing a target that moved, and drop one that despawned.
    match followee {
        Some(HealTarget::Player(role)) => {
            follow_beside(npc, players.get(role).location, ctx.rng);
        }
        Some(HealTarget::Runner(id)) => match runners.iter().find(|runner| runner.id == id) {
            Some(runner) => follow_beside(npc, runner.location, ctx.rng),
            None => {
                followee = None;
                npc.stop_destination();
            }
        },
        None => {}
    }

    if followee.is_none() {
        let found = if no_follow_i == 0 {
            followee = pick_followee(npc, ctx, players, runners, target_state);
            match followee {
                Some(HealTarget::Player(role)) => {
                    follow_beside(npc, players.get(role).location, ctx.rng);
                }
                Some(HealTarget::Runner(id)) => {
                    if let Some(runner) = runners.iter().find(|runner| runner.id == id) {
                        follow_beside(npc, runner.location, ctx.rng);
                    }
                }
                None => {}
            }
            if followee.is_some() {
                in_initial_state = false;
            }
            followee.is_some()
        } else {
            false
        };
        if !found && !in_initial_state {
            npc.set_random_walk_destination(ctx.rng);
            if no_follow_i > 0 {
                no_follow_i -= 1;
            }
        }
    }

    npc.step(ctx.map, ctx.block);

    // Reaching the target flips the state and, for runners, heals them.
    let mut target_state = target_state;
    if let Some(target) = followee {
        let reached = match target {
            HealTarget::Player(role) => {
                can_act_on(ctx.map, npc.location, players.get(role).location, BESIDE)
            }
            HealTarget::Runner(id) => runners
                .iter()
                .find(|runner| runner.id == id)
                .is_some_and(|runner| can_act_on(ctx.map, npc.location, runner.location, BESIDE)),
        };
        if reached {
            target_state = (target_state + 1) % TARGET_STATE_COUNT;
            if let HealTarget::Runner(id) = target {
                if let Some(runner) = runners.iter_mut().find(|runner| runner.id == id) {
                    runner.hitpoints = super::hitpoints(Species::Runner, ctx.wave_number);
                }
            }
            followee = None;
            npc.stop_destination();
            no_follow_i = NO_FOLLOW_DELAYS[target_state];
        }
    }

    if let Brain::Healer(brain) = &mut npc.brain {
        brain.followee = followee;
        brain.in_initial_state = in_initial_state;
        brain.no_follow_i = no_follow_i;
        brain.target_state = target_state;
    }
}

fn tick_poison(npc: &mut Npc, ctx: &NpcCtx<'_>) {
    let Brain::Healer(brain) = &mut npc.brain else {
        return;
    };
    if (ctx.rel_tick - brain.poison_start_tick) % POISON_TICKS == 0 && brain.is_poisoned() {
        brain.poison_i -= 1;
        npc.hitpoints -= brain.poison_damage();
    }
}

fn pick_followee(
    npc: &Npc,
    ctx: &mut NpcCtx<'_>,
    players: &Players,
    runners: &[Npc],
    target_state: usize,
) -> Option<HealTarget> {
    if target_state == TARGETING_RUNNER {
        choose_visible(
            ctx.rng,
            ctx.map,
            npc.location,
            SNIFF_DISTANCE,
            runners
                .iter()
                .filter(|runner| runner.alive)
                .map(|runner| (HealTarget::Runner(runner.id), runner.location)),
        )
    } else {
        choose_visible(
            ctx.rng,
            ctx.map,
            npc.location,
            ACTION_DISTANCE,
            players
                .iter()
                .map(|player| (HealTarget::Player(player.role), player.location)),
        )
    }
}
