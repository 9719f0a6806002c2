//! The built-in 24-cell journey.

use game_core::{Board, SetupError, Tile, TileKind};

/// Tiles of the standard journey, starting at the home cell.
pub fn standard_tiles() -> Vec<Tile> {
    vec![
        Tile::new(TileKind::Plain, "Qufu in Lu"),
        Tile::state("Wei", "the State of Wei"),
        Tile::new(TileKind::Fate, "Fate"),
        Tile::new(TileKind::Event, "Besieged at Kuang"),
        Tile::new(TileKind::Chance, "Chance"),
        Tile::state("Song", "the State of Song"),
        Tile::new(TileKind::Plain, "Riverside Rest"),
        Tile::new(TileKind::Fate, "Fate"),
        Tile::new(TileKind::Event, "Zheng City Gate"),
        Tile::state("Chen", "the State of Chen"),
        Tile::new(TileKind::Chance, "Chance"),
        Tile::new(TileKind::Plain, "Mountain Pass"),
        Tile::state("Cai", "the State of Cai"),
        Tile::new(TileKind::Event, "Between Chen and Cai"),
        Tile::new(TileKind::Fate, "Fate"),
        Tile::state("She", "the Land of She"),
        Tile::new(TileKind::Event, "The Duke of She Asks About Governance"),
        Tile::new(TileKind::Chance, "Chance"),
        Tile::state("Chu", "the State of Chu"),
        Tile::new(TileKind::Plain, "Crossing the Ford"),
        Tile::new(TileKind::Fate, "Fate"),
        Tile::state("Qi", "the State of Qi"),
        Tile::new(TileKind::Chance, "Chance"),
        Tile::new(TileKind::Event, "The Road Home"),
    ]
}

pub fn standard_board() -> Result<Board, SetupError> {
    Board::new(standard_tiles())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_board_layout() {
        let board = standard_board().unwrap();
        assert_eq!(board.len(), 24);
        assert_eq!(board.tile(Board::START).unwrap().kind, TileKind::Plain);
        assert_eq!(board.tile(23).unwrap().index, 23);
        for kind in [
            TileKind::State,
            TileKind::Fate,
            TileKind::Chance,
            TileKind::Event,
        ] {
            assert!(board.tiles().iter().any(|t| t.kind == kind), "{kind} missing");
        }
    }

    #[test]
    fn state_tiles_carry_a_theme() {
        let board = standard_board().unwrap();
        let wei = board.tile(1).unwrap();
        assert_eq!(wei.theme(), "the State of Wei");
        assert_eq!(board.tile(2).unwrap().theme(), "Fate");
    }
}
