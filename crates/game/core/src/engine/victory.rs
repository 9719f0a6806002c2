use super::GameEngine;
use crate::state::{Modal, Player, PlayerId};

/// First player, in roster order, whose resources reach `threshold`.
pub fn check_victory(players: &[Player], threshold: u32) -> Option<PlayerId> {
    players.iter().find(|p| p.meat >= threshold).map(|p| p.id)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VictoryCheck {
    NoWinner,
    /// A winner was declared by this check.
    Declared(PlayerId),
    /// A winner already existed; nothing changed.
    AlreadyDeclared(PlayerId),
}

impl<'a> GameEngine<'a> {
    /// Declares a winner at most once per game and opens the win modal.
    pub fn check_victory(&mut self) -> VictoryCheck {
        if let Some(winner) = self.state.winner {
            return VictoryCheck::AlreadyDeclared(winner);
        }
        match check_victory(&self.state.players, self.state.win_condition) {
            Some(winner) => {
                self.state.winner = Some(winner);
                self.state.modal = Modal::Win { winner };
                self.state.trial_selection = None;
                self.state.awaiting_confirmation = false;
                self.state.ai_decision = None;
                VictoryCheck::Declared(winner)
            }
            None => VictoryCheck::NoWinner,
        }
    }
}
