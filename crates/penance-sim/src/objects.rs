//! Ground items and the two runner traps.
//!
//! No behavior lives here. Items are created and consumed by player and
//! hostile logic; the vectors they sit in keep insertion order, which is
//! what runner bait targeting relies on.

use penance_core::coord::Coord;
use penance_core::enums::{EggKind, FoodKind, ItemId, Side};

/// Bait dropped by the defender.
#[derive(Debug, Clone)]
pub struct Food {
    pub id: ItemId,
    pub location: Coord,
    pub kind: FoodKind,
    /// Whether this matched the correct defender call when dropped.
    pub is_correct: bool,
}

/// An egg the collector can gather.
#[derive(Debug, Clone)]
pub struct Egg {
    pub id: ItemId,
    pub location: Coord,
    pub kind: EggKind,
}

/// Hammer-and-logs items, collectively "hnl".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HnlKind {
    Hammer,
    NearLogs,
    FarLogs,
}

#[derive(Debug, Clone)]
pub struct HnlItem {
    pub id: ItemId,
    pub location: Coord,
    pub kind: HnlKind,
}

/// One of the two runner traps. Charges go down when runners die on
/// them and back to full when the defender repairs them.
#[derive(Debug, Clone)]
pub struct Trap {
    pub side: Side,
    pub location: Coord,
    pub charges: u8,
}

impl Trap {
    pub fn is_charged(&self) -> bool {
        self.charges > 0
    }
}
