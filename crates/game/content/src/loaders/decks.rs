//! Card deck loader.

use std::path::Path;

use crate::Decks;
use crate::loaders::{LoadResult, read_file};

/// Loader for trial/fate/chance decks from RON files.
pub struct DeckLoader;

impl DeckLoader {
    /// Loads decks and validates them against a board of `board_len` cells.
    pub fn load(path: &Path, board_len: usize) -> LoadResult<Decks> {
        let content = read_file(path)?;
        let decks: Decks = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse decks RON: {}", e))?;

        decks.validate(board_len)?;
        Ok(decks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_standard(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("decks.ron");
        let text =
            ron::ser::to_string_pretty(&Decks::standard(), ron::ser::PrettyConfig::default())
                .unwrap();
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn loads_exported_decks() {
        let dir = TempDir::new().unwrap();
        let path = write_standard(&dir);

        let decks = DeckLoader::load(&path, 24).unwrap();
        assert_eq!(decks, Decks::standard());
    }

    #[test]
    fn validation_errors_surface() {
        let dir = TempDir::new().unwrap();
        let path = write_standard(&dir);

        let err = DeckLoader::load(&path, 12).unwrap_err();
        assert!(err.to_string().contains("teleports"));
    }

    #[test]
    fn malformed_ron_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("decks.ron");
        std::fs::write(&path, "(trials: [").unwrap();

        assert!(DeckLoader::load(&path, 24).is_err());
    }
}
