use crate::GameId;
use thiserror::Error;

/// Record-level failures. Each one excludes a single record from the output, never the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PbpError {
    #[error("Malformed clock \"{clock}\" (expected MM:SS)")]
    MalformedClock { clock: String },

    #[error("Invalid period {period}")]
    InvalidPeriod { period: u8 },

    #[error("No game metadata for game {game_id}")]
    UnknownGame { game_id: GameId },
}
