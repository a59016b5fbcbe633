//! The game loop: tick sequencing, the stall queue, and command entry.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use penance_core::commands::PlayerCommand;
use penance_core::coord::{Coord, EAST, SOUTH, WEST};
use penance_core::enums::{EndReason, ItemId, NpcId, Role};
use penance_core::error::GameError;
use penance_core::events::SimEvent;
use penance_core::state::GameSnapshot;
use penance_terrain::{BlockGrid, TileMap};

use crate::deferred::DeferredAction;
use crate::log::EventLog;
use crate::player::{CommandCtx, PlayerTickCtx};
use crate::players::Players;
use crate::wave::Wave;

/// Highest wave index this engine simulates. The queen fight above it
/// needs mechanics that do not exist here.
const MAX_WAVE_INDEX: usize = 8;

/// Monotonic id source for hostiles and ground items.
#[derive(Debug, Default)]
pub struct IdAlloc {
    next_npc: u32,
    next_item: u32,
}

impl IdAlloc {
    pub fn next_npc(&mut self) -> NpcId {
        let id = NpcId(self.next_npc);
        self.next_npc += 1;
        id
    }

    pub fn next_item(&mut self) -> ItemId {
        let id = ItemId(self.next_item);
        self.next_item += 1;
        id
    }
}

pub struct Game {
    map: TileMap,
    block: BlockGrid,
    rng: ChaCha8Rng,
    /// Game tick counter; tick 0 is the first processed tick of a wave.
    tick: i64,
    players: Players,
    wave: Option<Wave>,
    stall: VecDeque<DeferredAction>,
    log: EventLog,
    ids: IdAlloc,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        let map = TileMap::standard();
        let mut block = BlockGrid::new();
        let players = Players::new(&map, &mut block);
        Self {
            map,
            block,
            rng: ChaCha8Rng::seed_from_u64(seed),
            tick: -1,
            players,
            wave: None,
            stall: VecDeque::new(),
            log: EventLog::new(),
            ids: IdAlloc::default(),
        }
    }

    /// Reset players and start a wave. `runner_script` forces the walk
    /// rolls of the first runners: dash-separated groups of `w`/`e`/`s`
    /// letters, one group per runner, empty for fully random runners.
    pub fn start_new_wave(&mut self, number: usize, runner_script: &str) -> Result<(), GameError> {
        if number > MAX_WAVE_INDEX {
            return Err(GameError::InvalidWaveIndex(number));
        }
        let movements = parse_runner_script(runner_script)?;

        self.block = BlockGrid::new();
        self.players = Players::new(&self.map, &mut self.block);
        self.stall.clear();
        self.log.clear();
        self.tick = -1;

        let mut wave = Wave::new(number, 0, &self.map, &mut self.ids);
        wave.penance.runner_movements = movements;
        self.wave = Some(wave);
        self.log.push(SimEvent::WaveStarted { number });
        Ok(())
    }

    /// Advance one tick. Returns false once the wave is over.
    pub fn tick(&mut self) -> Result<bool, GameError> {
        if self.wave.is_none() {
            return Err(GameError::WaveNotStarted);
        }
        self.tick += 1;
        self.drain_stall();

        let Some(wave) = self.wave.as_mut() else {
            return Err(GameError::WaveNotStarted);
        };
        let waving = wave.tick(
            self.tick,
            &self.map,
            &self.block,
            &mut self.rng,
            &self.players,
            &mut self.stall,
            &mut self.ids,
            &mut self.log,
        );
        if !waving {
            return Ok(false);
        }

        let rel_tick = wave.relative_tick(self.tick);
        let Wave {
            penance,
            dropped_food,
            dropped_eggs,
            dropped_hnls,
            hnl_flags,
            traps,
            correct_calls,
            ..
        } = wave;
        let mut ctx = PlayerTickCtx {
            map: &self.map,
            block: &mut self.block,
            rel_tick,
            dropped_food,
            dropped_eggs,
            dropped_hnls,
            hnl_flags,
            traps,
            healers: &mut penance.healers,
            correct_calls,
            log: &mut self.log,
        };
        for player in self.players.iter_mut() {
            player.tick(&mut ctx);
        }
        Ok(true)
    }

    /// Deferred effects queued on the previous tick run first, in
    /// order. Anything they queue in turn waits for the next tick.
    fn drain_stall(&mut self) {
        let Some(wave) = self.wave.as_mut() else {
            return;
        };
        let drained: Vec<DeferredAction> = self.stall.drain(..).collect();
        let rel_tick = wave.relative_tick(self.tick);
        for action in drained {
            match action {
                DeferredAction::ChangeCall => {
                    wave.change_call(rel_tick, &mut self.rng, &mut self.log);
                }
                DeferredAction::EndWave => {
                    wave.end(EndReason::Cleared, rel_tick, &mut self.log);
                }
                DeferredAction::SpawnSpecies(species) => {
                    wave.spawn_species(
                        species,
                        self.tick,
                        &self.map,
                        &self.block,
                        &mut self.rng,
                        &mut self.ids,
                        &mut self.log,
                    );
                }
            }
        }
    }

    /// Apply one player command between ticks. Returns whether the
    /// command was accepted.
    pub fn player_command(&mut self, role: Role, command: &PlayerCommand) -> bool {
        let Some(wave) = self.wave.as_mut() else {
            return false;
        };
        let Wave {
            calls,
            correct_calls,
            dropped_food,
            dropped_eggs,
            dropped_hnls,
            traps,
            penance,
            ..
        } = wave;
        let mut ctx = CommandCtx {
            map: &self.map,
            calls,
            correct_calls,
            dropped_food,
            dropped_eggs,
            dropped_hnls,
            traps,
            healers: &penance.healers,
            ids: &mut self.ids,
            log: &mut self.log,
        };
        self.players.get_mut(role).handle_command(command, &mut ctx)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        crate::snapshot::build(self)
    }

    pub fn events(&self) -> &[SimEvent] {
        self.log.events()
    }

    pub fn messages(&self) -> &[String] {
        self.log.messages()
    }

    pub fn current_tick(&self) -> i64 {
        self.tick
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    pub fn wave(&self) -> Option<&Wave> {
        self.wave.as_ref()
    }

    pub fn wave_mut(&mut self) -> Option<&mut Wave> {
        self.wave.as_mut()
    }
}

/// Parse a forced runner walk script. Groups are dash-separated; each
/// letter is one five-tile walk roll.
fn parse_runner_script(script: &str) -> Result<VecDeque<VecDeque<Coord>>, GameError> {
    let mut movements = VecDeque::new();
    if script.is_empty() {
        return Ok(movements);
    }
    for group in script.split('-') {
        let mut moves = VecDeque::new();
        for letter in group.chars() {
            let direction = match letter.to_ascii_lowercase() {
                'w' => WEST,
                'e' => EAST,
                's' => SOUTH,
                other => {
                    return Err(GameError::InvalidMovementScript(other.to_string()));
                }
            };
            moves.push_back(direction);
        }
        movements.push_back(moves);
    }
    Ok(movements)
}
