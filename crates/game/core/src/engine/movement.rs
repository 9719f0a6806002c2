//! Track movement arithmetic.
//!
//! Movement happens one cell at a time so every intermediate cell can be
//! observed; [`plan_route`] computes the same result in one go.

use super::GameEngine;
use crate::board::Board;
use crate::error::EngineError;
use crate::state::PlayerId;

/// Final cell and number of start-cell passes for a whole move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub final_position: usize,
    pub passes: u32,
}

/// One cell of movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub player: PlayerId,
    pub from: usize,
    pub to: usize,
    /// The step wrapped onto the start cell from another cell.
    pub passed_start: bool,
}

fn next_cell(position: usize, track_len: usize) -> (usize, bool) {
    let next = (position + 1) % track_len;
    (next, position != Board::START && next == Board::START)
}

/// Walks `steps` cells from `start` on a ring of `track_len` cells.
pub fn plan_route(start: usize, steps: u32, track_len: usize) -> Route {
    if track_len == 0 {
        return Route {
            final_position: start,
            passes: 0,
        };
    }
    let mut position = start % track_len;
    let mut passes = 0;
    for _ in 0..steps {
        let (next, passed) = next_cell(position, track_len);
        if passed {
            passes += 1;
        }
        position = next;
    }
    Route {
        final_position: position,
        passes,
    }
}

impl<'a> GameEngine<'a> {
    /// Moves a player forward by exactly one cell.
    pub fn step_forward(&mut self, id: PlayerId, track_len: usize) -> Result<Step, EngineError> {
        self.ensure_in_play()?;
        if track_len == 0 {
            return Err(EngineError::CellOutOfRange { cell: 0, len: 0 });
        }
        let player = self.player_mut(id)?;
        let from = player.position;
        let (to, passed_start) = next_cell(from, track_len);
        player.position = to;
        Ok(Step {
            player: id,
            from,
            to,
            passed_start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::{GameState, PlayerSetup};

    #[test]
    fn wraps_and_counts_passes() {
        let route = plan_route(10, 5, 12);
        assert_eq!(route.final_position, 3);
        assert_eq!(route.passes, 1);
    }

    #[test]
    fn final_position_is_modular_for_all_step_counts() {
        for len in 1..15usize {
            for start in 0..len {
                for steps in 0..40u32 {
                    let route = plan_route(start, steps, len);
                    assert_eq!(route.final_position, (start + steps as usize) % len);
                    // A ring of one cell never leaves the start cell.
                    if len > 1 {
                        let expected_passes = (start + steps as usize) / len;
                        assert_eq!(route.passes as usize, expected_passes);
                    }
                }
            }
        }
    }

    #[test]
    fn leaving_start_is_not_a_pass() {
        assert_eq!(plan_route(0, 3, 12).passes, 0);
        assert_eq!(plan_route(0, 12, 12).passes, 1);
    }

    #[test]
    fn step_forward_matches_plan() {
        let mut state = GameState::from_setup(
            &GameConfig::default(),
            &[PlayerSetup::human("a"), PlayerSetup::human("b")],
            0,
        )
        .unwrap();
        state.players[0].position = 10;

        let mut engine = GameEngine::new(&mut state);
        let mut passes = 0;
        for _ in 0..5 {
            let step = engine.step_forward(PlayerId(0), 12).unwrap();
            passes += u32::from(step.passed_start);
        }

        assert_eq!(state.players[0].position, 3);
        assert_eq!(passes, 1);
    }

    #[test]
    fn step_forward_refuses_after_win() {
        let mut state = GameState::from_setup(
            &GameConfig::default(),
            &[PlayerSetup::human("a"), PlayerSetup::human("b")],
            0,
        )
        .unwrap();
        state.winner = Some(PlayerId(1));
        let mut engine = GameEngine::new(&mut state);
        assert_eq!(
            engine.step_forward(PlayerId(0), 12),
            Err(EngineError::GameOver(PlayerId(1)))
        );
        assert_eq!(state.players[0].position, 0);
    }
}
