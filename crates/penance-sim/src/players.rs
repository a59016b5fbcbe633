//! The five-player roster, indexed by role.

use penance_core::enums::Role;
use penance_terrain::{BlockGrid, TileMap};

use crate::player::Player;

#[derive(Debug)]
pub struct Players([Player; 5]);

impl Players {
    /// Everyone at their spawn tile, tiles blocked.
    pub fn new(map: &TileMap, block: &mut BlockGrid) -> Self {
        let players = Role::ALL.map(|role| {
            let spawn = map.landmarks().player_spawn(role);
            block.block(spawn);
            Player::new(role, spawn)
        });
        Self(players)
    }

    pub fn get(&self, role: Role) -> &Player {
        &self.0[role as usize]
    }

    pub fn get_mut(&mut self, role: Role) -> &mut Player {
        &mut self.0[role as usize]
    }

    /// Tick order: attackers, healer, collector, defender.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.0.iter_mut()
    }
}
