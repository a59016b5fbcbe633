//! One role player: inventory, movement, and command handling.
//!
//! Commands arrive between ticks and are either applied instantly
//! (calls, drops, destroys) or turned into a path plus a pending action
//! that fires on arrival. The pending action model mirrors how hostile
//! brains act on reach: trap repair fires before the step phase, the
//! rest after it.

use std::collections::VecDeque;

use penance_core::commands::PlayerCommand;
use penance_core::constants::{
    BAG_CAPACITY, DISPENSER_BUSY_TICKS, ITEM_RENDER_DISTANCE, OBJECT_RENDER_DISTANCE,
    POISON_BUSY_TICKS, TILE_RENDER_DISTANCE, TRAP_MAX_CHARGES, TRAP_REPAIR_TICKS,
    UNIT_RENDER_DISTANCE,
};
use penance_core::coord::{Coord, NORTH, WEST};
use penance_core::enums::{
    CallChannel, EggKind, FoodKind, InventorySlot, ItemId, NpcId, PoisonKind, Role, Side,
};
use penance_core::events::SimEvent;
use penance_terrain::path::bfs_path;
use penance_terrain::step::can_step;
use penance_terrain::{BlockGrid, TileMap};

use crate::engine::IdAlloc;
use crate::log::EventLog;
use crate::npc::{healer, Npc};
use crate::objects::{Egg, Food, HnlItem, HnlKind, Trap};
use crate::unit::{can_act_on, follow_destination, FollowKind, BESIDE, BESIDE_OR_UNDER};
use crate::wave::{SPAWN_FAR_LOGS, SPAWN_HAMMER, SPAWN_NEAR_LOGS};

pub const INVENTORY_SPACE: usize = 28;
/// Healer dispenser overstock size.
const FOOD_PER_OVERSTOCK: usize = 5;

/// An action queued to fire when the player reaches its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingAction {
    RepairTrap(Side),
    UseDispenser(Option<u8>),
    PickItem(ItemId),
    UsePoison { kind: PoisonKind, target: NpcId },
}

/// Mutable wave state player ticks need.
pub struct PlayerTickCtx<'a> {
    pub map: &'a TileMap,
    pub block: &'a mut BlockGrid,
    pub rel_tick: i64,
    pub dropped_food: &'a mut Vec<Food>,
    pub dropped_eggs: &'a mut Vec<Egg>,
    pub dropped_hnls: &'a mut Vec<HnlItem>,
    pub hnl_flags: &'a mut u8,
    pub traps: &'a mut [Trap; 2],
    pub healers: &'a mut Vec<Npc>,
    pub correct_calls: &'a [Option<u8>; 4],
    pub log: &'a mut EventLog,
}

/// Wave state command handling needs. Commands never move units, so
/// most of it is read-only.
pub struct CommandCtx<'a> {
    pub map: &'a TileMap,
    pub calls: &'a mut [Option<u8>; 4],
    pub correct_calls: &'a [Option<u8>; 4],
    pub dropped_food: &'a mut Vec<Food>,
    pub dropped_eggs: &'a [Egg],
    pub dropped_hnls: &'a [HnlItem],
    pub traps: &'a [Trap; 2],
    pub healers: &'a [Npc],
    pub ids: &'a mut IdAlloc,
    pub log: &'a mut EventLog,
}

#[derive(Debug)]
pub struct Player {
    pub role: Role,
    pub location: Coord,
    pub destination: Coord,
    pub is_running: bool,
    pub busy_ticks: u32,
    pub inventory: [InventorySlot; INVENTORY_SPACE],
    /// Collector's egg bag contents.
    pub bag: Vec<EggKind>,
    pathing_queue: VecDeque<Coord>,
    pending: Option<PendingAction>,
    /// Trap side mid-repair; completes when the busy counter runs out.
    repairing: Option<Side>,
}

impl Player {
    pub fn new(role: Role, spawn: Coord) -> Self {
        Self {
            role,
            location: spawn,
            destination: spawn,
            is_running: true,
            busy_ticks: 0,
            inventory: starting_inventory(role),
            bag: Vec::new(),
            pathing_queue: VecDeque::new(),
            pending: None,
            repairing: None,
        }
    }

    pub fn tick(&mut self, ctx: &mut PlayerTickCtx<'_>) {
        if self.busy_ticks > 0 {
            self.busy_ticks -= 1;
            if self.busy_ticks == 0 {
                self.finish_repair(ctx);
            }
            return;
        }

        if let Some(PendingAction::RepairTrap(side)) = self.pending {
            self.try_start_repair(side, ctx);
        }

        self.step(ctx);

        match self.pending {
            Some(PendingAction::UseDispenser(option)) => {
                let dispenser = ctx.map.landmarks().dispenser(self.role);
                if can_act_on(ctx.map, self.location, dispenser, FollowKind::Offset(NORTH)) {
                    self.pending = None;
                    self.stop_movement();
                    self.restock(option);
                }
            }
            Some(PendingAction::PickItem(id)) => {
                let spot = item_location(ctx.dropped_food, ctx.dropped_eggs, ctx.dropped_hnls, id);
                match spot {
                    Some(location)
                        if can_act_on(
                            ctx.map,
                            self.location,
                            location,
                            FollowKind::Offset(penance_core::coord::UNDER),
                        ) =>
                    {
                        self.pending = None;
                        self.stop_movement();
                        self.pick_item(id, ctx);
                    }
                    Some(_) => {}
                    None => {
                        self.pending = None;
                        self.stop_movement();
                    }
                }
            }
            Some(PendingAction::UsePoison { kind, target }) => {
                let spot = ctx
                    .healers
                    .iter()
                    .find(|npc| npc.id == target)
                    .map(|npc| npc.location);
                match spot {
                    Some(location) if can_act_on(ctx.map, self.location, location, BESIDE) => {
                        self.pending = None;
                        self.stop_movement();
                        self.use_poison_food(kind, target, ctx);
                    }
                    Some(_) => {}
                    None => {
                        self.pending = None;
                        self.stop_movement();
                    }
                }
            }
            Some(PendingAction::RepairTrap(_)) | None => {}
        }
    }

    /// Apply one command. Returns whether it was accepted; a rejected
    /// command has no side effects.
    pub fn handle_command(&mut self, command: &PlayerCommand, ctx: &mut CommandCtx<'_>) -> bool {
        match command {
            PlayerCommand::Move { destination } => {
                if self.location.chebyshev_to(*destination) > TILE_RENDER_DISTANCE {
                    return false;
                }
                self.pending = None;
                self.walk_to(ctx.map, *destination);
                true
            }
            PlayerCommand::SendCall => {
                let channel = self.role.calls_for();
                let Some(call) = ctx.correct_calls[channel.index()] else {
                    return false;
                };
                ctx.calls[channel.index()] = Some(call);
                ctx.log.push(SimEvent::CallSent {
                    by: self.role,
                    call,
                });
                true
            }
            PlayerCommand::SelectCall { call } => {
                let channel = self.role.calls_for();
                if *call >= channel.call_count() {
                    return false;
                }
                ctx.calls[channel.index()] = Some(*call);
                ctx.log.push(SimEvent::CallSent {
                    by: self.role,
                    call: *call,
                });
                true
            }
            PlayerCommand::UseDispenser { option } => {
                // Overstock menus only exist on the healer dispenser.
                if option.is_some() && self.role != Role::Healer {
                    return false;
                }
                let dispenser = ctx.map.landmarks().dispenser(self.role);
                if self.location.chebyshev_to(dispenser) > OBJECT_RENDER_DISTANCE {
                    return false;
                }
                self.pending = Some(PendingAction::UseDispenser(*option));
                self.walk_to(ctx.map, dispenser + NORTH);
                true
            }
            PlayerCommand::DestroyItems { slots } => {
                for &slot in slots {
                    let Some(item) = self.inventory.get(slot).copied() else {
                        continue;
                    };
                    if !matches!(item, InventorySlot::Horn | InventorySlot::Blocked) {
                        self.inventory[slot] = InventorySlot::Empty;
                    }
                }
                true
            }
            PlayerCommand::PickItem { id } => {
                if self.role != Role::Defender && self.role != Role::Collector {
                    return false;
                }
                let spot = match self.role {
                    Role::Defender => item_location(ctx.dropped_food, &[], ctx.dropped_hnls, *id),
                    _ => item_location(&[], ctx.dropped_eggs, &[], *id),
                };
                let Some(location) = spot else {
                    return false;
                };
                if self.location.chebyshev_to(location) > ITEM_RENDER_DISTANCE {
                    return false;
                }
                self.pending = Some(PendingAction::PickItem(*id));
                self.walk_to(ctx.map, location);
                true
            }
            PlayerCommand::RepairTrap { which } => {
                if self.role != Role::Defender {
                    return false;
                }
                let trap = &ctx.traps[*which as usize];
                if self.location.chebyshev_to(trap.location) > OBJECT_RENDER_DISTANCE {
                    return false;
                }
                self.pending = Some(PendingAction::RepairTrap(*which));
                let approach =
                    follow_destination(self.location, trap.location, BESIDE_OR_UNDER, WEST);
                self.walk_to(ctx.map, approach);
                true
            }
            PlayerCommand::DropFood { kind, count } => {
                if self.role != Role::Defender {
                    return false;
                }
                if !self.has_slot(InventorySlot::Food { food: *kind }) {
                    return false;
                }
                let correct_call = ctx.correct_calls[CallChannel::Defender.index()];
                for _ in 0..*count {
                    if !self.consume_slot(InventorySlot::Food { food: *kind }) {
                        break;
                    }
                    ctx.dropped_food.push(Food {
                        id: ctx.ids.next_item(),
                        location: self.location,
                        kind: *kind,
                        is_correct: correct_call == Some(food_call(*kind)),
                    });
                }
                true
            }
            PlayerCommand::DropSelectFood { slots } => {
                if self.role != Role::Defender {
                    return false;
                }
                let correct_call = ctx.correct_calls[CallChannel::Defender.index()];
                for &slot in slots {
                    let Some(InventorySlot::Food { food }) =
                        self.inventory.get(slot).copied()
                    else {
                        continue;
                    };
                    self.inventory[slot] = InventorySlot::Empty;
                    ctx.dropped_food.push(Food {
                        id: ctx.ids.next_item(),
                        location: self.location,
                        kind: food,
                        is_correct: correct_call == Some(food_call(food)),
                    });
                }
                true
            }
            PlayerCommand::UsePoisonFood { kind, target } => {
                if self.role != Role::Healer {
                    return false;
                }
                if !self.has_slot(InventorySlot::Poison { poison: *kind }) {
                    return false;
                }
                let Some(npc) = ctx.healers.iter().find(|npc| npc.id == *target) else {
                    return false;
                };
                if !npc.alive
                    || self.location.chebyshev_to(npc.location) > UNIT_RENDER_DISTANCE
                {
                    return false;
                }
                self.pending = Some(PendingAction::UsePoison {
                    kind: *kind,
                    target: *target,
                });
                let approach = follow_destination(self.location, npc.location, BESIDE, WEST);
                self.walk_to(ctx.map, approach);
                true
            }
            PlayerCommand::Idle => {
                self.pending = None;
                self.stop_movement();
                true
            }
        }
    }

    /// Path to a tile, replacing any current path.
    fn walk_to(&mut self, map: &TileMap, destination: Coord) {
        self.pathing_queue.clear();
        self.destination = destination;
        self.pathing_queue = bfs_path(map, self.location, destination).into();
        if self.pathing_queue.is_empty() {
            self.destination = self.location;
        }
    }

    fn stop_movement(&mut self) {
        self.pathing_queue.clear();
        self.destination = self.location;
    }

    /// Up to two tiles per tick while running. Players reblock the
    /// tiles they move across; the blocks only ever stop hostiles.
    fn step(&mut self, ctx: &mut PlayerTickCtx<'_>) {
        let steps = if self.is_running { 2 } else { 1 };
        for _ in 0..steps {
            let Some(&next) = self.pathing_queue.front() else {
                break;
            };
            if !can_step(ctx.map, self.location, next) {
                // A refused step cancels whatever was queued to happen
                // on arrival.
                self.pending = None;
                break;
            }
            self.pathing_queue.pop_front();
            ctx.block.unblock(self.location);
            self.location = next;
            ctx.block.block(self.location);
        }
    }

    fn try_start_repair(&mut self, side: Side, ctx: &mut PlayerTickCtx<'_>) {
        let trap = &ctx.traps[side as usize];
        if !can_act_on(ctx.map, self.location, trap.location, BESIDE_OR_UNDER) {
            return;
        }
        self.pending = None;
        self.stop_movement();
        if trap.charges >= TRAP_MAX_CHARGES {
            return;
        }
        if self.has_slot(InventorySlot::Hammer) && self.has_slot(InventorySlot::Logs) {
            self.busy_ticks = TRAP_REPAIR_TICKS;
            self.repairing = Some(side);
        }
    }

    fn finish_repair(&mut self, ctx: &mut PlayerTickCtx<'_>) {
        let Some(side) = self.repairing.take() else {
            return;
        };
        ctx.traps[side as usize].charges = TRAP_MAX_CHARGES;
        self.consume_slot(InventorySlot::Logs);
        ctx.log.push(SimEvent::TrapRepaired { side });
    }

    /// Role-specific dispenser stock patterns. Attacker and collector
    /// dispensers hold nothing restockable.
    fn restock(&mut self, option: Option<u8>) {
        match self.role {
            Role::Defender => {
                let mut alternator = FoodKind::ALL.iter().cycle();
                for slot in self.inventory.iter_mut() {
                    if slot.is_empty() {
                        if let Some(&food) = alternator.next() {
                            *slot = InventorySlot::Food { food };
                        }
                    }
                }
            }
            Role::Healer => {
                let overstock = option
                    .and_then(|pick| PoisonKind::ALL.get(pick as usize).copied());
                if let Some(poison) = overstock {
                    let mut stocked = 0;
                    for slot in self.inventory.iter_mut() {
                        if slot.is_empty() {
                            *slot = InventorySlot::Poison { poison };
                            stocked += 1;
                            if stocked == FOOD_PER_OVERSTOCK {
                                break;
                            }
                        }
                    }
                } else {
                    let mut has_vial = self.has_slot(InventorySlot::Vial);
                    let mut alternator = PoisonKind::ALL.iter().cycle();
                    for slot in self.inventory.iter_mut() {
                        if !slot.is_empty() {
                            continue;
                        }
                        if !has_vial {
                            *slot = InventorySlot::Vial;
                            has_vial = true;
                            continue;
                        }
                        if let Some(&poison) = alternator.next() {
                            *slot = InventorySlot::Poison { poison };
                        }
                    }
                }
            }
            _ => {}
        }
        self.busy_ticks = DISPENSER_BUSY_TICKS;
    }

    fn pick_item(&mut self, id: ItemId, ctx: &mut PlayerTickCtx<'_>) {
        if self.role == Role::Collector {
            if self.bag.len() >= BAG_CAPACITY {
                return;
            }
            if let Some(index) = ctx.dropped_eggs.iter().position(|egg| egg.id == id) {
                let egg = ctx.dropped_eggs.remove(index);
                self.bag.push(egg.kind);
            }
            return;
        }

        if !self.inventory.iter().any(|slot| slot.is_empty()) {
            return;
        }
        if let Some(index) = ctx.dropped_hnls.iter().position(|item| item.id == id) {
            let item = ctx.dropped_hnls.remove(index);
            let (slot, flag) = match item.kind {
                HnlKind::Hammer => (InventorySlot::Hammer, SPAWN_HAMMER),
                HnlKind::NearLogs => (InventorySlot::Logs, SPAWN_NEAR_LOGS),
                HnlKind::FarLogs => (InventorySlot::Logs, SPAWN_FAR_LOGS),
            };
            self.fill_slot(slot);
            *ctx.hnl_flags |= flag;
        } else if let Some(index) = ctx.dropped_food.iter().position(|food| food.id == id) {
            let food = ctx.dropped_food.remove(index);
            self.fill_slot(InventorySlot::Food { food: food.kind });
        }
    }

    fn use_poison_food(&mut self, kind: PoisonKind, target: NpcId, ctx: &mut PlayerTickCtx<'_>) {
        let Some(npc) = ctx.healers.iter_mut().find(|npc| npc.id == target) else {
            return;
        };
        if !npc.alive || !self.consume_slot(InventorySlot::Poison { poison: kind }) {
            return;
        }
        if ctx.correct_calls[CallChannel::Healer.index()] == Some(poison_call(kind)) {
            healer::apply_poison(npc, ctx.rel_tick);
            ctx.log.push(SimEvent::HealerPoisoned {
                target_hp: npc.hitpoints,
            });
        } else {
            ctx.log.message("Incorrect poison food.");
        }
        self.busy_ticks = POISON_BUSY_TICKS;
    }

    fn has_slot(&self, wanted: InventorySlot) -> bool {
        self.inventory.contains(&wanted)
    }

    /// Replace the first matching slot with an empty one.
    fn consume_slot(&mut self, wanted: InventorySlot) -> bool {
        if let Some(slot) = self.inventory.iter_mut().find(|slot| **slot == wanted) {
            *slot = InventorySlot::Empty;
            true
        } else {
            false
        }
    }

    /// Fill the first empty slot.
    fn fill_slot(&mut self, item: InventorySlot) -> bool {
        if let Some(slot) = self.inventory.iter_mut().find(|slot| slot.is_empty()) {
            *slot = item;
            true
        } else {
            false
        }
    }
}

/// The call index a bait kind corresponds to.
fn food_call(kind: FoodKind) -> u8 {
    match kind {
        FoodKind::Tofu => 0,
        FoodKind::Crackers => 1,
        FoodKind::Worms => 2,
    }
}

fn poison_call(kind: PoisonKind) -> u8 {
    match kind {
        PoisonKind::Tofu => 0,
        PoisonKind::Worms => 1,
        PoisonKind::Meat => 2,
    }
}

fn item_location(food: &[Food], eggs: &[Egg], hnls: &[HnlItem], id: ItemId) -> Option<Coord> {
    food.iter()
        .find(|item| item.id == id)
        .map(|item| item.location)
        .or_else(|| {
            eggs.iter()
                .find(|item| item.id == id)
                .map(|item| item.location)
        })
        .or_else(|| {
            hnls.iter()
                .find(|item| item.id == id)
                .map(|item| item.location)
        })
}

fn starting_inventory(role: Role) -> [InventorySlot; INVENTORY_SPACE] {
    let mut inventory = [InventorySlot::Empty; INVENTORY_SPACE];
    inventory[0] = InventorySlot::Horn;
    match role {
        Role::MainAttacker | Role::SecondAttacker => {
            for slot in inventory.iter_mut().skip(1) {
                *slot = InventorySlot::Blocked;
            }
        }
        Role::Healer => {
            inventory[1] = InventorySlot::Vial;
            inventory[26] = InventorySlot::Blocked;
            inventory[27] = InventorySlot::Blocked;
        }
        Role::Collector => {
            inventory[1] = InventorySlot::Bag;
            inventory[26] = InventorySlot::Blocked;
            inventory[27] = InventorySlot::Blocked;
        }
        Role::Defender => {}
    }
    inventory
}
