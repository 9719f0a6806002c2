//! Content loaders for reading game data from files.
//!
//! Boards, decks and event books are RON; game configuration is TOML.

pub mod board;
pub mod config;
pub mod decks;
pub mod events;
pub mod factory;

pub use board::BoardLoader;
pub use config::ConfigLoader;
pub use decks::DeckLoader;
pub use events::EventLoader;
pub use factory::ContentFactory;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
