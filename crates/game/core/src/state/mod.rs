//! Authoritative session state.
//!
//! This module owns the data structures that describe the roster, whose turn
//! it is, the active modal with its card, and the narrative log. Runtime layers
//! clone or query this state but mutate it exclusively through the engine.
mod log;
mod player;

pub use log::NarrativeLog;
pub use player::{Player, PlayerId, PlayerSetup};

use crate::cards::{AiDecision, ChanceCard, EventCard, FateCard, TrialCard};
use crate::config::GameConfig;
use crate::error::SetupError;
use crate::rng::compute_seed;

/// Discriminant of [`Modal`], handy for logging and guards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ModalKind {
    Trial,
    Fate,
    Chance,
    EventDetail,
    Win,
}

/// The modal currently shown to players, carrying the active card.
///
/// `Win` is absorbing: once set, nothing replaces it until a restart.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Modal {
    #[default]
    None,
    Trial(TrialCard),
    Fate(FateCard),
    Chance(ChanceCard),
    EventDetail(EventCard),
    Win { winner: PlayerId },
}

impl Modal {
    pub fn kind(&self) -> Option<ModalKind> {
        match self {
            Modal::None => None,
            Modal::Trial(_) => Some(ModalKind::Trial),
            Modal::Fate(_) => Some(ModalKind::Fate),
            Modal::Chance(_) => Some(ModalKind::Chance),
            Modal::EventDetail(_) => Some(ModalKind::EventDetail),
            Modal::Win { .. } => Some(ModalKind::Win),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::None)
    }

    pub fn is_win(&self) -> bool {
        matches!(self, Modal::Win { .. })
    }
}

/// Canonical snapshot of a game session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once at game start and never modified. Combined with `nonce` to
    /// derive a unique seed for every draw.
    pub game_seed: u64,

    /// Draw counter, incremented by every random draw.
    pub nonce: u64,

    /// Turn order is roster order, fixed at game start.
    pub players: Vec<Player>,

    /// Index of the player whose turn it is.
    pub current: usize,

    pub win_condition: u32,

    pub modal: Modal,

    pub winner: Option<PlayerId>,

    /// Faces of the last two-dice roll.
    pub dice: [u32; 2],

    /// Option chosen in the open trial; locked once set.
    pub trial_selection: Option<usize>,

    /// An AI decision is waiting for a human to acknowledge it.
    pub awaiting_confirmation: bool,

    pub ai_decision: Option<AiDecision>,

    pub log: NarrativeLog,
}

impl GameState {
    /// Creates an empty state with no players (before a game starts, or after a restart).
    pub fn empty(log_capacity: usize) -> Self {
        Self {
            game_seed: 0,
            nonce: 0,
            players: Vec::new(),
            current: 0,
            win_condition: GameConfig::DEFAULT_WIN_CONDITION,
            modal: Modal::None,
            winner: None,
            dice: [1, 1],
            trial_selection: None,
            awaiting_confirmation: false,
            ai_decision: None,
            log: NarrativeLog::new(log_capacity),
        }
    }

    /// Builds the roster for a new game. Player ids follow roster order.
    pub fn from_setup(
        config: &GameConfig,
        roster: &[PlayerSetup],
        game_seed: u64,
    ) -> Result<Self, SetupError> {
        if roster.len() < GameConfig::MIN_PLAYERS {
            return Err(SetupError::TooFewPlayers {
                min: GameConfig::MIN_PLAYERS,
                found: roster.len(),
            });
        }
        if roster.len() > GameConfig::MAX_PLAYERS {
            return Err(SetupError::TooManyPlayers {
                max: GameConfig::MAX_PLAYERS,
                found: roster.len(),
            });
        }
        if config.win_condition == 0 {
            return Err(SetupError::ZeroWinCondition);
        }
        if let Some(index) = roster.iter().position(|p| p.character.trim().is_empty()) {
            return Err(SetupError::EmptyCharacter { index });
        }

        let players = roster
            .iter()
            .enumerate()
            .map(|(i, setup)| Player::new(PlayerId(i as u32), setup.character.clone(), setup.is_ai))
            .collect();

        Ok(Self {
            game_seed,
            players,
            win_condition: config.win_condition,
            ..Self::empty(config.log_capacity)
        })
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn is_won(&self) -> bool {
        self.winner.is_some()
    }

    /// True when `id` holds the current turn.
    pub fn is_current(&self, id: PlayerId) -> bool {
        self.current_player().is_some_and(|p| p.id == id)
    }

    /// Derives the seed for the next random draw and advances the nonce.
    pub fn next_draw_seed(&mut self, context: u32) -> u64 {
        let actor = self.current_player().map_or(0, |p| p.id.0);
        let seed = compute_seed(self.game_seed, self.nonce, actor, context);
        self.nonce += 1;
        seed
    }

    pub fn push_log(&mut self, message: impl Into<String>) {
        self.log.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<PlayerSetup> {
        vec![PlayerSetup::human("Yan Hui"), PlayerSetup::ai("Zilu")]
    }

    #[test]
    fn setup_assigns_ids_in_roster_order() {
        let state = GameState::from_setup(&GameConfig::default(), &roster(), 9).unwrap();
        assert_eq!(state.players[0].id, PlayerId(0));
        assert_eq!(state.players[1].id, PlayerId(1));
        assert!(state.players[1].is_ai);
        assert_eq!(state.current_player().unwrap().character, "Yan Hui");
        assert_eq!(state.win_condition, 10);
        assert_eq!(state.modal, Modal::None);
    }

    #[test]
    fn setup_rejects_bad_rosters() {
        let config = GameConfig::default();
        assert_eq!(
            GameState::from_setup(&config, &roster()[..1], 0),
            Err(SetupError::TooFewPlayers { min: 2, found: 1 })
        );
        let five = vec![PlayerSetup::human("a"); 5];
        assert!(matches!(
            GameState::from_setup(&config, &five, 0),
            Err(SetupError::TooManyPlayers { .. })
        ));
        let blank = vec![PlayerSetup::human("a"), PlayerSetup::ai("  ")];
        assert_eq!(
            GameState::from_setup(&config, &blank, 0),
            Err(SetupError::EmptyCharacter { index: 1 })
        );
        assert_eq!(
            GameState::from_setup(&config.clone().with_win_condition(0), &roster(), 0),
            Err(SetupError::ZeroWinCondition)
        );
    }

    #[test]
    fn draw_seeds_advance_nonce() {
        let mut state = GameState::from_setup(&GameConfig::default(), &roster(), 3).unwrap();
        let a = state.next_draw_seed(0);
        let b = state.next_draw_seed(0);
        assert_ne!(a, b);
        assert_eq!(state.nonce, 2);
    }

    #[test]
    fn modal_kinds() {
        assert_eq!(Modal::None.kind(), None);
        assert!(!Modal::None.is_open());
        let win = Modal::Win {
            winner: PlayerId(1),
        };
        assert!(win.is_open());
        assert!(win.is_win());
        assert_eq!(win.kind(), Some(ModalKind::Win));
    }
}
