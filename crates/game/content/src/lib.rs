//! Static game content and loaders.
//!
//! This crate houses the built-in journey (board, trial/fate/chance decks and
//! event vignettes) and provides loaders for RON/TOML data files:
//! - Board layouts (RON)
//! - Card decks (RON)
//! - Event vignettes (RON)
//! - Game configuration (TOML)
//!
//! Content is read by the runtime when it draws cards; only the drawn card is
//! copied into game state.

pub mod board;
pub mod decks;
pub mod events;
mod pack;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use board::{standard_board, standard_tiles};
pub use decks::{ContentError, Decks};
pub use events::{EventBook, Vignette};
pub use pack::Content;

#[cfg(feature = "loaders")]
pub use loaders::{BoardLoader, ConfigLoader, ContentFactory, DeckLoader, EventLoader};
