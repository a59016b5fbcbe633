//! Simulation events and the human-readable message log.

use serde::{Deserialize, Serialize};

use crate::enums::{CallChannel, EndReason, Role, Species};

/// A notable occurrence during a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    WaveStarted { number: usize },
    WaveEnded { reason: EndReason },
    NpcSpawned { species: Species },
    NpcDied { species: Species },
    SpeciesExtinct { species: Species },
    CallChanged { channel: CallChannel, call: u8 },
    CallSent { by: Role, call: u8 },
    RunnerAte { correct: bool },
    RunnerEscaped,
    HealerPoisoned { target_hp: i32 },
    TrapRepaired { side: crate::enums::Side },
}

/// Render a tick counter as elapsed seconds. One tick is 0.6 seconds;
/// the fractional part is dropped when it is zero.
pub fn tick_to_string(tick: i64) -> String {
    let seconds = 3 * tick / 5;
    let remainder = (3 * tick).rem_euclid(5) * 2;
    if remainder == 0 {
        format!("{seconds}s")
    } else {
        format!("{seconds}.{remainder}s")
    }
}
