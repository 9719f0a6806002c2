//! Error types surfaced by game-core.
//!
//! Engine errors describe contract violations: a caller asked the engine to
//! mutate a player that does not exist, to move onto a cell outside the track,
//! or to keep playing after a winner was declared. The runtime treats every one
//! of them as a defensive no-op rather than a crash.

use crate::state::PlayerId;

/// Errors returned by [`crate::engine::GameEngine`] transforms.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineError {
    #[error("the roster is empty")]
    EmptyRoster,

    #[error("player {0} is not in the roster")]
    UnknownPlayer(PlayerId),

    #[error("cell {cell} is outside a track of {len} cells")]
    CellOutOfRange { cell: usize, len: usize },

    #[error("the game is already won by player {0}")]
    GameOver(PlayerId),

    #[error("player {0} has no turns left to skip")]
    NotPaused(PlayerId),

    #[error("no trial is open")]
    NoTrialOpen,

    #[error("a trial option is already selected")]
    SelectionLocked,

    #[error("option {0} does not exist")]
    OptionOutOfRange(usize),

    #[error("a {0} modal is already open")]
    ModalAlreadyOpen(crate::state::ModalKind),
}

/// Errors raised while building a session from a roster.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    #[error("at least {min} players are required, got {found}")]
    TooFewPlayers { min: usize, found: usize },

    #[error("at most {max} players are supported, got {found}")]
    TooManyPlayers { max: usize, found: usize },

    #[error("win condition must be at least 1")]
    ZeroWinCondition,

    #[error("player {index} has an empty character name")]
    EmptyCharacter { index: usize },

    #[error("board has no tiles")]
    EmptyBoard,
}
