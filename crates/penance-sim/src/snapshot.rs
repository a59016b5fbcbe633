//! Builds the serializable [`GameSnapshot`] from live engine state.

use penance_core::enums::Species;
use penance_core::state::{
    GameSnapshot, GroundItem, ItemView, NpcView, PlayerView, TrapView, WaveView,
};

use crate::engine::Game;
use crate::npc::{Brain, Npc};
use crate::objects::HnlKind;

pub fn build(game: &Game) -> GameSnapshot {
    let players = game
        .players()
        .iter()
        .map(|player| PlayerView {
            role: player.role,
            location: player.location,
            destination: player.destination,
            busy_ticks: player.busy_ticks,
            inventory: player.inventory.to_vec(),
        })
        .collect();

    let mut npcs = Vec::new();
    let mut items = Vec::new();
    let mut traps = Vec::new();
    let wave = game.wave().map(|wave| {
        for species in Species::ALL {
            npcs.extend(wave.penance.roster(species).iter().map(npc_view));
        }
        for food in &wave.dropped_food {
            items.push(ItemView {
                id: food.id,
                location: food.location,
                item: GroundItem::Food { food: food.kind },
            });
        }
        for egg in &wave.dropped_eggs {
            items.push(ItemView {
                id: egg.id,
                location: egg.location,
                item: GroundItem::Egg { egg: egg.kind },
            });
        }
        for hnl in &wave.dropped_hnls {
            let item = match hnl.kind {
                HnlKind::Hammer => GroundItem::Hammer,
                HnlKind::NearLogs | HnlKind::FarLogs => GroundItem::Logs,
            };
            items.push(ItemView {
                id: hnl.id,
                location: hnl.location,
                item,
            });
        }
        for trap in &wave.traps {
            traps.push(TrapView {
                side: trap.side,
                location: trap.location,
                charges: trap.charges,
            });
        }
        WaveView {
            number: wave.number,
            relative_tick: wave.relative_tick(game.current_tick()),
            ended: wave.ended,
            correct_calls: wave.correct_calls,
            sent_calls: wave.calls,
        }
    });

    GameSnapshot {
        tick: game.current_tick(),
        wave,
        players,
        npcs,
        items,
        traps,
        messages: game.messages().to_vec(),
    }
}

fn npc_view(npc: &Npc) -> NpcView {
    let poisoned = match &npc.brain {
        Brain::Healer(brain) => brain.is_poisoned(),
        _ => false,
    };
    NpcView {
        id: npc.id,
        species: npc.species,
        location: npc.location,
        hitpoints: npc.hitpoints,
        alive: npc.alive,
        poisoned,
    }
}
