use game_core::{Board, SetupError};

use crate::{Decks, EventBook, standard_board};

/// Everything the runtime draws from during a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Content {
    pub board: Board,
    pub decks: Decks,
    pub events: EventBook,
}

impl Content {
    pub fn standard() -> Result<Self, SetupError> {
        Ok(Self {
            board: standard_board()?,
            decks: Decks::standard(),
            events: EventBook::standard(),
        })
    }
}
