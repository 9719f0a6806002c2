//! Board layout loader.

use std::path::Path;

use game_core::{Board, Tile, TileKind};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TileSpec {
    kind: TileKind,
    name: String,
    #[serde(default)]
    label: Option<String>,
}

/// Board layout for RON files. Cell indices follow list order.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BoardRon {
    tiles: Vec<TileSpec>,
}

/// Loader for board layouts from RON files.
pub struct BoardLoader;

impl BoardLoader {
    pub fn load(path: &Path) -> LoadResult<Board> {
        let content = read_file(path)?;
        let data: BoardRon = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse board RON: {}", e))?;

        let tiles = data
            .tiles
            .into_iter()
            .map(|spec| Tile {
                label: spec.label,
                ..Tile::new(spec.kind, spec.name)
            })
            .collect();

        Ok(Board::new(tiles)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_tiles_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.ron");
        std::fs::write(
            &path,
            r#"(tiles: [
                (kind: Plain, name: "Home"),
                (kind: State, name: "Wei", label: Some("the State of Wei")),
                (kind: Chance, name: "Chance"),
            ])"#,
        )
        .unwrap();

        let board = BoardLoader::load(&path).unwrap();
        assert_eq!(board.len(), 3);
        assert_eq!(board.tile(1).unwrap().index, 1);
        assert_eq!(board.tile(1).unwrap().theme(), "the State of Wei");
        assert_eq!(board.tile(2).unwrap().kind, TileKind::Chance);
    }

    #[test]
    fn empty_board_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.ron");
        std::fs::write(&path, "(tiles: [])").unwrap();

        assert!(BoardLoader::load(&path).is_err());
    }
}
