//! Tick cadence, ranges, and other tuning values shared across the crates.

use crate::coord::Coord;

// Tick cadence. One tick is 0.6 simulated seconds.
/// Length of one AI cycle; hostiles act on a sub-schedule inside it.
pub const CYCLE_TICKS: i64 = 10;
/// Horn calls rotate on this period.
pub const CALL_TICKS: i64 = 50;
/// A wave that has not ended on its own times out after this many ticks.
pub const WAVE_TICKS: i64 = 300;
/// Poison deals one hit every this many ticks.
pub const POISON_TICKS: i64 = 5;

// Ranges, all Chebyshev.
/// A unit can be targeted for an action inside this range.
pub const ACTION_DISTANCE: i32 = 15;
/// One tile more than [`ACTION_DISTANCE`]; approach targets use this.
pub const SAFE_ACTION_DISTANCE: i32 = 16;
/// A runner smells dropped bait inside this range.
pub const SNIFF_DISTANCE: i32 = 5;

// Render distances around each player, by snapshot layer.
pub const TILE_RENDER_DISTANCE: i32 = 44;
pub const UNIT_RENDER_DISTANCE: i32 = 40;
pub const OBJECT_RENDER_DISTANCE: i32 = 40;
pub const ITEM_RENDER_DISTANCE: i32 = 40;

/// Node budget for breadth-first pathing.
pub const BFS_NODE_LIMIT: usize = 1120;

// Line of sight runs on 16-bit fixed point.
pub const LOS_SHIFT: u32 = 16;
pub const LOS_HALF_TILE: i64 = 1 << (LOS_SHIFT - 1);

/// Ticks a corpse lingers before its tile is vacated.
pub const DESPAWN_TICKS: i32 = 2;

/// How deep into despawn a corpse must be before its slot counts as free
/// for the next reinforcement, per species in spawn order.
pub const DUE_TO_SPAWN_TICKS: [i32; 4] = [0, 0, 1, 2];

// Timed player actions, in busy ticks.
pub const TRAP_REPAIR_TICKS: u32 = 5;
pub const POISON_BUSY_TICKS: u32 = 1;
pub const DISPENSER_BUSY_TICKS: u32 = 1;

/// Poison load applied by a healer player's poisoned bait.
pub const POISON_DOSE: i32 = 21;
/// Immediate damage on a fresh poison application.
pub const POISON_HIT: i32 = 4;

/// Egg bag capacity for the collector.
pub const BAG_CAPACITY: usize = 8;

/// Trap charge count when freshly repaired.
pub const TRAP_MAX_CHARGES: u8 = 2;

// Runner bait-scan zones: the grid of 8x8 zones is anchored here, and
// zone coordinates are clamped to this corner when scanning neighbors.
pub const RUNNER_ZONE_DIM: i32 = 8;
pub const RUNNER_ZONE_EDGE: Coord = Coord::new(-3, -6);
pub const RUNNER_ZONE_CLAMP: Coord = Coord::new(5, 5);
