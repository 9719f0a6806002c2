//! State transforms for the session store.
//!
//! Every rule change to [`GameState`] (positions, meat, pauses, modals,
//! turn order, victory) goes through [`GameEngine`]. Each method is one
//! atomic transform: it validates first and mutates only when every check
//! passes, so a rejected call leaves the state untouched. The narrative log
//! and the draw nonce are bookkeeping written directly by the runtime
//! (`GameState::push_log`, `GameState::next_draw_seed`); pacing and timers
//! live there too.

mod effects;
mod encounter;
mod movement;
mod turns;
mod victory;

pub use effects::{EffectOutcome, MeatChange};
pub use movement::{Route, Step, plan_route};
pub use turns::{PauseAck, TurnStart};
pub use victory::{VictoryCheck, check_victory};

use crate::error::EngineError;
use crate::state::{GameState, Player, PlayerId};

/// Rule engine borrowing the state it mutates.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine with the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Rejects every transform once a winner exists.
    fn ensure_in_play(&self) -> Result<(), EngineError> {
        match self.state.winner {
            Some(winner) => Err(EngineError::GameOver(winner)),
            None => Ok(()),
        }
    }

    fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, EngineError> {
        self.state
            .player_mut(id)
            .ok_or(EngineError::UnknownPlayer(id))
    }

    fn player(&self, id: PlayerId) -> Result<&Player, EngineError> {
        self.state.player(id).ok_or(EngineError::UnknownPlayer(id))
    }
}
