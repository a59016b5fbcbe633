//! Debug ASCII rendering of the arena with units overlaid.

use penance_core::enums::{Role, Species};

use crate::engine::Game;

fn role_letter(role: Role) -> char {
    match role {
        Role::MainAttacker => 'Q',
        Role::SecondAttacker => 'Z',
        Role::Healer => 'E',
        Role::Defender => 'W',
        Role::Collector => 'Y',
    }
}

fn species_letter(species: Species) -> char {
    match species {
        Species::Fighter => '?',
        Species::Ranger => '&',
        Species::Runner => '%',
        Species::Healer => '@',
    }
}

/// The terrain rows with players and hostiles drawn on top. Hostiles
/// render above players so overlaps show the interactable unit.
pub fn render_map(game: &Game) -> Vec<String> {
    let mut rows: Vec<Vec<char>> = game.map().rows().to_vec();

    let mut set = |x: i32, y: i32, letter: char| {
        if y >= 0 && x >= 0 {
            if let Some(row) = rows.get_mut(y as usize) {
                if let Some(cell) = row.get_mut(x as usize) {
                    *cell = letter;
                }
            }
        }
    };

    for player in game.players().iter() {
        set(player.location.x, player.location.y, role_letter(player.role));
    }

    if let Some(wave) = game.wave() {
        for species in Species::ALL {
            for npc in wave.penance.roster(species) {
                set(npc.location.x, npc.location.y, species_letter(species));
            }
        }
    }

    rows.into_iter().map(|row| row.into_iter().collect()).collect()
}
