//! Event types for different topics.

use game_core::{PlayerId, TurnStart};
use serde::{Deserialize, Serialize};

/// A turn changed hands, or the first turn of a game began.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEvent {
    pub player: PlayerId,
    pub start: TurnStart,
}

/// One narrative line, as added to the session log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub message: String,
}
