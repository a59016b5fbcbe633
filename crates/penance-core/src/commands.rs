//! Player-issued commands.
//!
//! Commands are validated against the issuing role and the current wave
//! state; an invalid command is rejected without side effects.

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::enums::{FoodKind, ItemId, NpcId, PoisonKind, Side};

/// Everything a player can ask their character to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerCommand {
    /// Walk toward a tile, pathing around obstructions.
    Move { destination: Coord },
    /// Blow the horn, broadcasting the partner channel's correct call.
    SendCall,
    /// Pick a specific call to broadcast, correct or not.
    SelectCall { call: u8 },
    /// Walk to the role's dispenser and restock. `option` picks an
    /// overstock menu entry where the dispenser offers one.
    UseDispenser { option: Option<u8> },
    /// Clear the named inventory slots.
    DestroyItems { slots: Vec<usize> },
    /// Walk to a ground item and pick it up.
    PickItem { id: ItemId },
    /// Walk to a trap and spend logs and a hammer repairing it.
    RepairTrap { which: Side },
    /// Drop up to `count` bait of one kind on the current tile.
    DropFood { kind: FoodKind, count: usize },
    /// Drop the bait in the named slots, in slot order.
    DropSelectFood { slots: Vec<usize> },
    /// Walk adjacent to a hostile healer and feed it poisoned bait.
    UsePoisonFood { kind: PoisonKind, target: NpcId },
    /// Cancel movement and pending actions.
    Idle,
}
