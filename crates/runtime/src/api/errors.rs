//! Unified error types surfaced by the runtime API.
//!
//! Refused intents, content-generation failures and worker coordination
//! failures each get their own enum so clients can tell a rule refusal apart
//! from a broken runtime.
use std::time::Duration;

use game_core::{PlayerId, SetupError};
use thiserror::Error;
use tokio::sync::oneshot;

use crate::controller::Phase;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("invalid content: {0}")]
    Content(String),

    #[error(transparent)]
    Setup(#[from] SetupError),
}

/// Why the session refused an intent. The state is unchanged when this is returned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Rejection {
    #[error("no game is in progress")]
    NotStarted,

    #[error("a game is already in progress")]
    AlreadyStarted,

    #[error("the game is over; player {winner} has won")]
    GameOver { winner: PlayerId },

    #[error("the board is busy ({phase})")]
    Busy { phase: Phase },

    #[error("player {player} is computer-controlled")]
    AiTurn { player: PlayerId },

    #[error("player {player} is paused for {turns_left} more turn(s)")]
    Paused { player: PlayerId, turns_left: u32 },

    #[error("no card is open")]
    NoModal,

    #[error("the open card is not a trial")]
    NoTrial,

    #[error("select an option before continuing")]
    NoSelection,

    #[error("an option is already selected")]
    SelectionLocked,

    #[error("option {choice} does not exist")]
    InvalidOption { choice: usize },

    #[error("nobody is waiting on a pause")]
    NotPaused,

    #[error("the computer player has not decided yet")]
    AwaitingAi,

    #[error("invalid setup: {0}")]
    Setup(SetupError),
}

/// Failure of the content-generation collaborator. Always recoverable.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("content generator unavailable: {0}")]
    Unavailable(String),

    #[error("content generator timed out after {0:?}")]
    TimedOut(Duration),

    #[error("malformed generator response: {0}")]
    Malformed(String),

    #[error("expected 4 options, got {0}")]
    OptionCount(usize),

    #[error("answer index {0} is outside 0..4")]
    AnswerOutOfRange(i64),

    #[error("response field `{0}` is empty")]
    EmptyField(&'static str),
}
