//! Cyclic board track.
//!
//! The track is a fixed ring of tiles. Cell 0 is the start cell; passing it
//! while moving earns the pass bonus.

use crate::error::SetupError;

/// Kind tag that selects which encounter a tile triggers.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TileKind {
    /// A state visited on the journey; landing triggers a trial.
    State,
    Fate,
    Chance,
    /// Historical vignette with a fixed consequence.
    Event,
    /// No encounter.
    Plain,
}

/// A single cell of the track.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub index: usize,
    pub kind: TileKind,
    pub name: String,
    /// Thematic label used to parameterize generated trials (State tiles only).
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: Option<String>,
}

impl Tile {
    pub fn new(kind: TileKind, name: impl Into<String>) -> Self {
        Self {
            index: 0,
            kind,
            name: name.into(),
            label: None,
        }
    }

    pub fn state(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::new(TileKind::State, name)
        }
    }

    /// Label handed to the trial generator: the thematic label, or the tile name.
    pub fn theme(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// Ordered ring of tiles. Indices are assigned from the tile order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    tiles: Vec<Tile>,
}

impl Board {
    pub const START: usize = 0;

    pub fn new(tiles: Vec<Tile>) -> Result<Self, SetupError> {
        if tiles.is_empty() {
            return Err(SetupError::EmptyBoard);
        }
        let tiles = tiles
            .into_iter()
            .enumerate()
            .map(|(index, tile)| Tile { index, ..tile })
            .collect();
        Ok(Self { tiles })
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_reindexes_tiles() {
        let board = Board::new(vec![
            Tile::new(TileKind::Plain, "Lu"),
            Tile::state("Wei", "Duke Ling of Wei"),
            Tile::new(TileKind::Fate, "Fate"),
        ])
        .unwrap();

        assert_eq!(board.len(), 3);
        assert_eq!(board.tile(2).unwrap().index, 2);
        assert_eq!(board.tile(1).unwrap().theme(), "Duke Ling of Wei");
        assert_eq!(board.tile(0).unwrap().theme(), "Lu");
        assert!(board.tile(3).is_none());
    }

    #[test]
    fn empty_board_is_rejected() {
        assert_eq!(Board::new(Vec::new()), Err(SetupError::EmptyBoard));
    }
}
