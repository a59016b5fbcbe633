//! Game-level errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("no wave is in progress")]
    WaveNotStarted,

    #[error("wave {0} cannot be simulated")]
    InvalidWaveIndex(usize),

    #[error("bad runner movement script: {0}")]
    InvalidMovementScript(String),
}
