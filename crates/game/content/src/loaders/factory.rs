//! Content factory for building a session's content from data files.

use std::path::{Path, PathBuf};

use crate::Content;
use crate::loaders::{BoardLoader, ConfigLoader, DeckLoader, EventLoader, LoadResult};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── board.ron
/// ├── decks.ron
/// └── events.ron
/// ```
///
/// Files that are absent fall back to the built-in content.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<game_core::GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(game_core::GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load board, decks and events, validating decks against the board.
    pub fn load_content(&self) -> LoadResult<Content> {
        let standard = Content::standard()?;

        let board_path = self.data_dir.join("board.ron");
        let board = if board_path.exists() {
            BoardLoader::load(&board_path)?
        } else {
            standard.board
        };

        let decks_path = self.data_dir.join("decks.ron");
        let decks = if decks_path.exists() {
            DeckLoader::load(&decks_path, board.len())?
        } else {
            standard.decks.validate(board.len())?;
            standard.decks
        };

        let events_path = self.data_dir.join("events.ron");
        let events = if events_path.exists() {
            EventLoader::load(&events_path)?
        } else {
            standard.events
        };

        Ok(Content {
            board,
            decks,
            events,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn empty_directory_yields_builtin_content() {
        let dir = TempDir::new().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_content().unwrap(), Content::standard().unwrap());
        assert_eq!(factory.load_config().unwrap(), game_core::GameConfig::default());
    }

    #[test]
    fn short_board_invalidates_builtin_decks() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("board.ron"),
            r#"(tiles: [(kind: Plain, name: "Home"), (kind: Fate, name: "Fate")])"#,
        )
        .unwrap();

        assert!(ContentFactory::new(dir.path()).load_content().is_err());
    }
}
