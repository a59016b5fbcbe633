//! Roles, species, items, and the small closed vocabularies of the game.

use serde::{Deserialize, Serialize};

/// Stable identifier for a hostile unit, unique within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NpcId(pub u32);

/// Stable identifier for a ground item, unique within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

/// The five player roles, in horn-of-glory listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    MainAttacker,
    SecondAttacker,
    Healer,
    Collector,
    Defender,
}

impl Role {
    /// All roles in tick order.
    pub const ALL: [Role; 5] = [
        Role::MainAttacker,
        Role::SecondAttacker,
        Role::Healer,
        Role::Collector,
        Role::Defender,
    ];

    /// Single-letter tag used in messages and the map legend.
    pub fn letter(self) -> char {
        match self {
            Role::MainAttacker => 'a',
            Role::SecondAttacker => 's',
            Role::Healer => 'h',
            Role::Collector => 'c',
            Role::Defender => 'd',
        }
    }

    /// The call channel this role listens on.
    pub fn channel(self) -> CallChannel {
        match self {
            Role::MainAttacker | Role::SecondAttacker => CallChannel::Attacker,
            Role::Healer => CallChannel::Healer,
            Role::Collector => CallChannel::Collector,
            Role::Defender => CallChannel::Defender,
        }
    }

    /// The channel this role is responsible for calling out.
    pub fn calls_for(self) -> CallChannel {
        match self {
            Role::MainAttacker | Role::SecondAttacker => CallChannel::Collector,
            Role::Healer => CallChannel::Defender,
            Role::Collector => CallChannel::Attacker,
            Role::Defender => CallChannel::Healer,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::MainAttacker => "main attacker",
            Role::SecondAttacker => "second attacker",
            Role::Healer => "healer",
            Role::Collector => "collector",
            Role::Defender => "defender",
        };
        f.write_str(name)
    }
}

/// One of the four horn call rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallChannel {
    Attacker,
    Collector,
    Defender,
    Healer,
}

impl CallChannel {
    pub const ALL: [CallChannel; 4] = [
        CallChannel::Attacker,
        CallChannel::Collector,
        CallChannel::Defender,
        CallChannel::Healer,
    ];

    pub fn index(self) -> usize {
        match self {
            CallChannel::Attacker => 0,
            CallChannel::Collector => 1,
            CallChannel::Defender => 2,
            CallChannel::Healer => 3,
        }
    }

    /// Number of distinct calls on this channel. Attackers pick from
    /// four styles; everyone else from three drop kinds.
    pub fn call_count(self) -> u8 {
        match self {
            CallChannel::Attacker => 4,
            _ => 3,
        }
    }
}

/// The four hostile species, in per-tick processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Fighter,
    Ranger,
    Runner,
    Healer,
}

impl Species {
    pub const ALL: [Species; 4] = [
        Species::Fighter,
        Species::Ranger,
        Species::Runner,
        Species::Healer,
    ];

    pub fn index(self) -> usize {
        match self {
            Species::Fighter => 0,
            Species::Ranger => 1,
            Species::Runner => 2,
            Species::Healer => 3,
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Species::Fighter => "fighter",
            Species::Ranger => "ranger",
            Species::Runner => "runner",
            Species::Healer => "healer",
        };
        f.write_str(name)
    }
}

/// Bait kinds the defender drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodKind {
    Tofu,
    Crackers,
    Worms,
}

impl FoodKind {
    /// Defender dispenser restock rotation.
    pub const ALL: [FoodKind; 3] = [FoodKind::Crackers, FoodKind::Tofu, FoodKind::Worms];
}

/// Poisoned bait kinds the healer carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoisonKind {
    Tofu,
    Worms,
    Meat,
}

impl PoisonKind {
    /// Healer dispenser restock rotation.
    pub const ALL: [PoisonKind; 3] = [PoisonKind::Tofu, PoisonKind::Worms, PoisonKind::Meat];
}

/// Egg colors the collector gathers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EggKind {
    Red,
    Green,
    Blue,
}

/// One backpack slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InventorySlot {
    Empty,
    /// The attack-style horn every role carries in slot zero.
    Horn,
    /// Slots past the role's usable capacity.
    Blocked,
    Food { food: FoodKind },
    Poison { poison: PoisonKind },
    Hammer,
    Logs,
    Vial,
    Bag,
}

impl InventorySlot {
    pub fn is_empty(self) -> bool {
        matches!(self, InventorySlot::Empty)
    }
}

/// Which of the two runner traps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    East,
    West,
}

/// Why a wave stopped ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Every hostile is dead, despawned, and out of reserves.
    Cleared,
    /// The wave hit the hard tick limit.
    Timeout,
}
