//! Modal bookkeeping for the active encounter.

use super::GameEngine;
use crate::cards::{AiDecision, TRIAL_OPTIONS};
use crate::error::EngineError;
use crate::state::Modal;

impl<'a> GameEngine<'a> {
    /// Stores the faces of a two-dice roll and returns their sum.
    pub fn record_roll(&mut self, dice: [u32; 2]) -> Result<u32, EngineError> {
        self.ensure_in_play()?;
        self.state.dice = dice;
        Ok(dice[0] + dice[1])
    }

    /// Shows a card. Only one modal may be open at a time.
    pub fn open_modal(&mut self, modal: Modal) -> Result<(), EngineError> {
        self.ensure_in_play()?;
        if let Some(kind) = self.state.modal.kind() {
            return Err(EngineError::ModalAlreadyOpen(kind));
        }
        self.state.modal = modal;
        self.state.trial_selection = None;
        self.state.awaiting_confirmation = false;
        self.state.ai_decision = None;
        Ok(())
    }

    /// Locks in an answer for the open trial and reports whether it is correct.
    pub fn select_trial_option(&mut self, choice: usize) -> Result<bool, EngineError> {
        self.ensure_in_play()?;
        let Modal::Trial(card) = &self.state.modal else {
            return Err(EngineError::NoTrialOpen);
        };
        if self.state.trial_selection.is_some() {
            return Err(EngineError::SelectionLocked);
        }
        if choice >= TRIAL_OPTIONS {
            return Err(EngineError::OptionOutOfRange(choice));
        }
        let correct = card.is_correct(choice);
        self.state.trial_selection = Some(choice);
        Ok(correct)
    }

    /// Records what an AI player decided; `awaiting` holds it for a human
    /// to acknowledge instead of applying it straight away.
    pub fn record_ai_decision(
        &mut self,
        decision: AiDecision,
        awaiting: bool,
    ) -> Result<(), EngineError> {
        self.ensure_in_play()?;
        if !self.state.modal.is_open() {
            return Err(EngineError::NoTrialOpen);
        }
        self.state.ai_decision = Some(decision);
        self.state.awaiting_confirmation = awaiting;
        Ok(())
    }

    /// Takes the pending AI decision, if any, clearing the confirmation flag.
    pub fn take_ai_decision(&mut self) -> Option<AiDecision> {
        self.state.awaiting_confirmation = false;
        self.state.ai_decision.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::TrialCard;
    use crate::config::GameConfig;
    use crate::state::{GameState, PlayerSetup};

    fn trial() -> TrialCard {
        TrialCard {
            id: 3,
            quote: "Is it not a pleasure to learn?".into(),
            question: "Which virtue?".into(),
            options: ["ren".into(), "li".into(), "yi".into(), "zhi".into()],
            answer_index: 0,
            explanation: "benevolence".into(),
            generated: false,
        }
    }

    fn state() -> GameState {
        let roster = [PlayerSetup::human("a"), PlayerSetup::ai("b")];
        GameState::from_setup(&GameConfig::default(), &roster, 2).unwrap()
    }

    #[test]
    fn selection_locks_after_first_choice() {
        let mut state = state();
        let mut engine = GameEngine::new(&mut state);
        engine.open_modal(Modal::Trial(trial())).unwrap();

        assert_eq!(engine.select_trial_option(2), Ok(false));
        assert_eq!(engine.select_trial_option(0), Err(EngineError::SelectionLocked));
        assert_eq!(state.trial_selection, Some(2));
    }

    #[test]
    fn selection_needs_an_open_trial() {
        let mut state = state();
        let mut engine = GameEngine::new(&mut state);
        assert_eq!(engine.select_trial_option(0), Err(EngineError::NoTrialOpen));
        engine.open_modal(Modal::Trial(trial())).unwrap();
        assert_eq!(engine.select_trial_option(4), Err(EngineError::OptionOutOfRange(4)));
        assert_eq!(engine.select_trial_option(0), Ok(true));
    }

    #[test]
    fn only_one_modal_at_a_time() {
        let mut state = state();
        let mut engine = GameEngine::new(&mut state);
        engine.open_modal(Modal::Trial(trial())).unwrap();
        assert_eq!(
            engine.open_modal(Modal::Trial(trial())),
            Err(EngineError::ModalAlreadyOpen(crate::state::ModalKind::Trial))
        );
    }

    #[test]
    fn ai_decision_round_trip() {
        let mut state = state();
        let mut engine = GameEngine::new(&mut state);
        engine.open_modal(Modal::Trial(trial())).unwrap();
        engine
            .record_ai_decision(AiDecision::Trial { choice: 1 }, true)
            .unwrap();
        assert!(engine.state().awaiting_confirmation);
        assert_eq!(engine.take_ai_decision(), Some(AiDecision::Trial { choice: 1 }));
        assert_eq!(engine.take_ai_decision(), None);
        assert!(!state.awaiting_confirmation);
    }

    #[test]
    fn roll_sums_faces() {
        let mut state = state();
        assert_eq!(GameEngine::new(&mut state).record_roll([3, 6]), Ok(9));
        assert_eq!(state.dice, [3, 6]);
    }
}
