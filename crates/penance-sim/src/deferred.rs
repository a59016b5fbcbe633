//! The stall queue.
//!
//! Several wave-level effects do not land on the tick that causes them:
//! reinforcement spawns, call rotations, and the wave-end check are all
//! queued here and drained in order at the start of the next tick.
//! Anything queued while draining waits a further tick.

use penance_core::enums::Species;

/// A wave effect postponed to the start of the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Spawn one reinforcement of this species at its cave mouth.
    SpawnSpecies(Species),
    /// Reroll the correct call on every channel.
    ChangeCall,
    /// Mark the wave as cleared.
    EndWave,
}
