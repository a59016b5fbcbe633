//! One wave: the hostile roster, ground items, traps, and calls.

use std::collections::VecDeque;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use penance_core::constants::{CALL_TICKS, CYCLE_TICKS, TRAP_MAX_CHARGES, WAVE_TICKS};
use penance_core::enums::{CallChannel, EndReason, Side, Species};
use penance_core::events::{tick_to_string, SimEvent};
use penance_terrain::{BlockGrid, TileMap};

use crate::deferred::DeferredAction;
use crate::engine::IdAlloc;
use crate::log::EventLog;
use crate::npc::NpcCtx;
use crate::objects::{Egg, Food, HnlItem, HnlKind, Trap};
use crate::penance::Penance;
use crate::players::Players;

// Hammer-and-logs respawn flags, set when an item is picked up and
// consumed on the next cycle boundary.
pub const SPAWN_HAMMER: u8 = 0b001;
pub const SPAWN_NEAR_LOGS: u8 = 0b010;
pub const SPAWN_FAR_LOGS: u8 = 0b100;

#[derive(Debug)]
pub struct Wave {
    pub number: usize,
    pub start_tick: i64,
    pub end_flag: bool,
    pub ended: Option<EndReason>,
    pub penance: Penance,
    pub dropped_food: Vec<Food>,
    pub dropped_eggs: Vec<Egg>,
    pub dropped_hnls: Vec<HnlItem>,
    pub hnl_flags: u8,
    /// East trap first.
    pub traps: [Trap; 2],
    /// Calls players have blown, by channel.
    pub calls: [Option<u8>; 4],
    /// What each channel's call should currently be.
    pub correct_calls: [Option<u8>; 4],
}

impl Wave {
    pub fn new(number: usize, start_tick: i64, map: &TileMap, ids: &mut IdAlloc) -> Self {
        let lm = map.landmarks();
        let dropped_hnls = vec![
            HnlItem {
                id: ids.next_item(),
                location: lm.hammer_spawn,
                kind: HnlKind::Hammer,
            },
            HnlItem {
                id: ids.next_item(),
                location: lm.logs_spawn,
                kind: HnlKind::NearLogs,
            },
            HnlItem {
                id: ids.next_item(),
                location: lm.far_logs_spawn,
                kind: HnlKind::FarLogs,
            },
        ];
        Self {
            number,
            start_tick,
            end_flag: false,
            ended: None,
            penance: Penance::new(number),
            dropped_food: Vec::new(),
            dropped_eggs: Vec::new(),
            dropped_hnls,
            hnl_flags: 0,
            traps: [
                Trap {
                    side: Side::East,
                    location: lm.east_trap,
                    charges: TRAP_MAX_CHARGES,
                },
                Trap {
                    side: Side::West,
                    location: lm.west_trap,
                    charges: TRAP_MAX_CHARGES,
                },
            ],
            calls: [None; 4],
            correct_calls: [None; 4],
        }
    }

    pub fn relative_tick(&self, game_tick: i64) -> i64 {
        game_tick - self.start_tick
    }

    /// One wave tick. Returns false once the wave is over.
    #[allow(clippy::too_many_arguments)]
    pub fn tick(
        &mut self,
        game_tick: i64,
        map: &TileMap,
        block: &BlockGrid,
        rng: &mut ChaCha8Rng,
        players: &Players,
        stall: &mut VecDeque<DeferredAction>,
        ids: &mut IdAlloc,
        log: &mut EventLog,
    ) -> bool {
        let rel_tick = self.relative_tick(game_tick);

        if rel_tick == WAVE_TICKS && !self.end_flag {
            self.end(EndReason::Timeout, rel_tick, log);
            return false;
        }
        if self.end_flag {
            return false;
        }

        if rel_tick % CALL_TICKS == 1 {
            stall.push_back(DeferredAction::ChangeCall);
        }

        let Wave {
            number,
            penance,
            dropped_food,
            traps,
            ..
        } = self;
        let mut ctx = NpcCtx {
            map,
            block,
            rng,
            rel_tick,
            wave_number: *number,
            log,
        };
        let hostiles_left = penance.tick(&mut ctx, players, dropped_food, traps, stall);
        if !hostiles_left {
            stall.push_back(DeferredAction::EndWave);
        }

        if rel_tick % CYCLE_TICKS == 0 {
            self.respawn_hnls(map, ids);
        }

        true
    }

    /// Put back any hammer or logs whose pickup flag is set.
    fn respawn_hnls(&mut self, map: &TileMap, ids: &mut IdAlloc) {
        let lm = map.landmarks();
        if self.hnl_flags & SPAWN_HAMMER != 0 {
            self.dropped_hnls.push(HnlItem {
                id: ids.next_item(),
                location: lm.hammer_spawn,
                kind: HnlKind::Hammer,
            });
        }
        if self.hnl_flags & SPAWN_NEAR_LOGS != 0 {
            self.dropped_hnls.push(HnlItem {
                id: ids.next_item(),
                location: lm.logs_spawn,
                kind: HnlKind::NearLogs,
            });
        }
        if self.hnl_flags & SPAWN_FAR_LOGS != 0 {
            self.dropped_hnls.push(HnlItem {
                id: ids.next_item(),
                location: lm.far_logs_spawn,
                kind: HnlKind::FarLogs,
            });
        }
        self.hnl_flags = 0;
    }

    /// Reroll every channel. The new call is always different from the
    /// previous one, and player-blown calls are wiped.
    pub fn change_call(&mut self, rel_tick: i64, rng: &mut ChaCha8Rng, log: &mut EventLog) {
        self.calls = [None; 4];
        for channel in CallChannel::ALL {
            let count = u32::from(channel.call_count());
            let index = channel.index();
            let call = match self.correct_calls[index] {
                None => rng.gen_range(0..count) as u8,
                Some(old) => {
                    let mut call = rng.gen_range(0..count - 1) as u8;
                    if call >= old {
                        call += 1;
                    }
                    call
                }
            };
            self.correct_calls[index] = Some(call);
            log.push(SimEvent::CallChanged { channel, call });
        }
        log.message(format!(
            "Wave {}: Call {} ({}).",
            self.number,
            rel_tick / CALL_TICKS,
            tick_to_string(rel_tick)
        ));
    }

    pub fn end(&mut self, reason: EndReason, rel_tick: i64, log: &mut EventLog) {
        if self.end_flag {
            return;
        }
        self.end_flag = true;
        self.ended = Some(reason);
        log.message(format!(
            "Wave {}: Wave ended ({}).",
            self.number,
            tick_to_string(rel_tick)
        ));
        log.push(SimEvent::WaveEnded { reason });
    }

    /// Deferred reinforcement spawn, run while draining the stall
    /// queue.
    pub fn spawn_species(
        &mut self,
        species: Species,
        game_tick: i64,
        map: &TileMap,
        block: &BlockGrid,
        rng: &mut ChaCha8Rng,
        ids: &mut IdAlloc,
        log: &mut EventLog,
    ) {
        let rel_tick = self.relative_tick(game_tick);
        let mut ctx = NpcCtx {
            map,
            block,
            rng,
            rel_tick,
            wave_number: self.number,
            log,
        };
        self.penance.spawn(species, &mut ctx, ids);
    }

    /// Drop an egg on the floor. Nothing in the wave spawns eggs on its
    /// own; this is the injection point for embedding code.
    pub fn drop_egg(&mut self, egg: Egg) {
        self.dropped_eggs.push(egg);
    }
}
