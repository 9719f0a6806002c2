use super::GameEngine;
use crate::error::EngineError;
use crate::state::{Modal, PlayerId};

/// How the new current player's turn begins after [`GameEngine::advance_turn`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnStart {
    /// The player must sit this turn out; the pause has to be acknowledged.
    Paused { player: PlayerId, turns_left: u32 },
    /// The player just served the last skipped turn and gets a recovery beat first.
    Recovering { player: PlayerId },
    /// Normal turn, waiting for a roll.
    Ready { player: PlayerId },
}

impl TurnStart {
    pub fn player(&self) -> PlayerId {
        match *self {
            TurnStart::Paused { player, .. }
            | TurnStart::Recovering { player }
            | TurnStart::Ready { player } => player,
        }
    }
}

/// Result of acknowledging a skipped turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PauseAck {
    pub player: PlayerId,
    pub turns_left: u32,
    /// True when this acknowledgement consumed the last skipped turn.
    pub released: bool,
}

impl<'a> GameEngine<'a> {
    /// Passes the turn to the next player in roster order and clears the
    /// transient encounter state. A won modal is never cleared.
    pub fn advance_turn(&mut self) -> Result<TurnStart, EngineError> {
        self.ensure_in_play()?;
        let count = self.state.players.len();
        if count == 0 {
            return Err(EngineError::EmptyRoster);
        }

        self.state.current = (self.state.current + 1) % count;
        self.clear_encounter();

        let next = &self.state.players[self.state.current];
        let start = if next.is_skipping() {
            TurnStart::Paused {
                player: next.id,
                turns_left: next.turns_to_skip,
            }
        } else if next.was_paused {
            TurnStart::Recovering { player: next.id }
        } else {
            TurnStart::Ready { player: next.id }
        };
        Ok(start)
    }

    /// Consumes one skipped turn of the current player.
    pub fn acknowledge_pause(&mut self) -> Result<PauseAck, EngineError> {
        self.ensure_in_play()?;
        let player = self
            .state
            .players
            .get_mut(self.state.current)
            .ok_or(EngineError::EmptyRoster)?;
        if player.turns_to_skip == 0 {
            return Err(EngineError::NotPaused(player.id));
        }

        player.turns_to_skip -= 1;
        let released = player.turns_to_skip == 0;
        player.is_paused = !released;
        player.was_paused = released;

        Ok(PauseAck {
            player: player.id,
            turns_left: player.turns_to_skip,
            released,
        })
    }

    /// Ends the recovery beat that follows a served pause.
    pub fn finish_recovery(&mut self, id: PlayerId) -> Result<TurnStart, EngineError> {
        self.ensure_in_play()?;
        self.player_mut(id)?.was_paused = false;
        Ok(TurnStart::Ready { player: id })
    }

    /// Closes the open modal (unless it is the win modal) and forgets the
    /// selection and any pending AI decision.
    pub fn clear_encounter(&mut self) {
        if !self.state.modal.is_win() {
            self.state.modal = Modal::None;
        }
        self.state.trial_selection = None;
        self.state.awaiting_confirmation = false;
        self.state.ai_decision = None;
    }
}
