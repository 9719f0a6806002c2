use game_core::{AiDecision, GameMode, Modal, Player, PlayerId};
use serde::{Deserialize, Serialize};

use super::{Phase, TurnController};
use crate::scheduler::RevealKind;

/// Resource change currently being animated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationView {
    pub player: PlayerId,
    pub amount: i32,
}

/// Everything a renderer needs after a transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub mode: GameMode,
    pub win_condition: u32,
    pub board_len: usize,
    pub players: Vec<Player>,
    pub current: Option<PlayerId>,
    pub modal: Modal,
    pub dice: [u32; 2],
    pub trial_selection: Option<usize>,
    pub awaiting_confirmation: bool,
    pub ai_decision: Option<AiDecision>,
    pub winner: Option<PlayerId>,
    pub reveal: Option<RevealKind>,
    pub animation: Option<AnimationView>,
    /// Narrative messages, newest first.
    pub log: Vec<String>,
    /// True whenever the board is not waiting for a roll.
    pub busy: bool,
    /// A positive resource change is on screen.
    pub celebrating: bool,
    pub generating: bool,
}

impl SessionSnapshot {
    pub fn current_player(&self) -> Option<&Player> {
        let id = self.current?;
        self.players.iter().find(|p| p.id == id)
    }
}

impl TurnController {
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = &self.state;
        let animation = self.animation.as_ref().map(|a| AnimationView {
            player: a.player,
            amount: a.amount,
        });

        SessionSnapshot {
            phase: self.phase,
            mode: self.game.mode,
            win_condition: state.win_condition,
            board_len: self.content.board.len(),
            players: state.players.clone(),
            current: state.current_player().map(|p| p.id),
            modal: state.modal.clone(),
            dice: state.dice,
            trial_selection: state.trial_selection,
            awaiting_confirmation: state.awaiting_confirmation,
            ai_decision: state.ai_decision,
            winner: state.winner,
            reveal: self.reveal,
            animation,
            log: state.log.iter().map(str::to_owned).collect(),
            busy: self.phase != Phase::Idle,
            celebrating: animation.is_some_and(|a| a.amount > 0),
            generating: self.phase == Phase::Generating,
        }
    }
}
