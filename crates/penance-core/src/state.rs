//! Read-only snapshot of everything visible to the players.
//!
//! Snapshots are serializable and stable across runs with the same seed,
//! which is what the determinism tests compare.

use serde::Serialize;

use crate::coord::Coord;
use crate::enums::{
    EggKind, EndReason, FoodKind, InventorySlot, ItemId, NpcId, PoisonKind, Role, Side, Species,
};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub role: Role,
    pub location: Coord,
    pub destination: Coord,
    pub busy_ticks: u32,
    pub inventory: Vec<InventorySlot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NpcView {
    pub id: NpcId,
    pub species: Species,
    pub location: Coord,
    pub hitpoints: i32,
    pub alive: bool,
    pub poisoned: bool,
}

/// What kind of thing is lying on the ground.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GroundItem {
    Food { food: FoodKind },
    Poison { poison: PoisonKind },
    Egg { egg: EggKind },
    Hammer,
    Logs,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    pub id: ItemId,
    pub location: Coord,
    pub item: GroundItem,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrapView {
    pub side: Side,
    pub location: Coord,
    pub charges: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct WaveView {
    pub number: usize,
    pub relative_tick: i64,
    pub ended: Option<EndReason>,
    /// Correct call per channel, indexed by [`crate::enums::CallChannel::index`].
    pub correct_calls: [Option<u8>; 4],
    /// Call each channel last heard over the horn.
    pub sent_calls: [Option<u8>; 4],
}

/// Full observable game state at the end of a tick.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub tick: i64,
    pub wave: Option<WaveView>,
    pub players: Vec<PlayerView>,
    pub npcs: Vec<NpcView>,
    pub items: Vec<ItemView>,
    pub traps: Vec<TrapView>,
    pub messages: Vec<String>,
}
