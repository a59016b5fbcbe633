//! Fighters and rangers.
//!
//! Combat hostiles chase one player at a time, re-rolling their mark at
//! the top of every cycle, and freeze in place once the mark is inside
//! attack range with line of sight.

use penance_core::constants::{ACTION_DISTANCE, CYCLE_TICKS};
use penance_core::enums::Role;

use crate::npc::{choose_visible, follow_beside, Brain, Npc, NpcCtx};
use crate::players::Players;
use crate::unit::{can_act_at_range, can_act_on, BESIDE};

const FIGHTER_ATTACK_RANGE: i32 = 1;
const RANGER_ATTACK_RANGE: i32 = 5;

#[derive(Debug, Clone)]
pub struct CombatBrain {
    pub attack_range: i32,
    pub followee: Option<Role>,
    /// A player who hit this hostile before it marked anyone; it
    /// retaliates against them on its next idle tick.
    pub tagger: Option<Role>,
}

impl CombatBrain {
    pub fn fighter() -> Self {
        Self {
            attack_range: FIGHTER_ATTACK_RANGE,
            followee: None,
            tagger: None,
        }
    }

    pub fn ranger() -> Self {
        Self {
            attack_range: RANGER_ATTACK_RANGE,
            followee: None,
            tagger: None,
        }
    }
}

pub fn do_cycle(npc: &mut Npc, ctx: &mut NpcCtx<'_>, players: &Players) {
    let (mut followee, mut tagger, attack_range) = match &npc.brain {
        Brain::Combat(brain) => (brain.followee, brain.tagger, brain.attack_range),
        _ => return,
    };

    // Follow a mark that may have moved since last tick.
    if let Some(role) = followee {
        follow_beside(npc, players.get(role).location, ctx.rng);
    }

    if followee.is_none() {
        if let Some(role) = tagger.take() {
            followee = Some(role);
            follow_beside(npc, players.get(role).location, ctx.rng);
        } else {
            npc.set_random_walk_destination(ctx.rng);
        }
    }

    if ctx.rel_tick > 0 && ctx.rel_tick % CYCLE_TICKS == 0 {
        followee = choose_visible(
            ctx.rng,
            ctx.map,
            npc.location,
            ACTION_DISTANCE,
            players.iter().map(|player| (player.role, player.location)),
        );
        match followee {
            Some(role) => follow_beside(npc, players.get(role).location, ctx.rng),
            None => npc.set_random_walk_destination(ctx.rng),
        }
    }

    if let Some(role) = followee {
        let mark = players.get(role).location;
        // Melee needs cardinal adjacency; ranged anywhere in range but
        // not underneath. Both need sight.
        let in_position = if attack_range > 1 {
            can_act_at_range(ctx.map, npc.location, mark, attack_range)
        } else {
            can_act_on(ctx.map, npc.location, mark, BESIDE)
        };
        if in_position {
            npc.stop_destination();
        }
    }

    npc.step(ctx.map, ctx.block);

    if let Brain::Combat(brain) = &mut npc.brain {
        brain.followee = followee;
        brain.tagger = tagger;
    }
}
