//! Delays that pace the session state machine.

use std::time::Duration;

use game_core::{GameMode, ModalKind};

/// Every delay used between scheduled transitions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timings {
    /// Dice tumble before the result is known.
    pub roll: Duration,
    /// Between two cells of a move.
    pub step: Duration,
    /// After the last step, before the tile action (no pass bonus).
    pub arrival_settle: Duration,
    /// Fate/Chance "big icon" before the card is drawn.
    pub reveal: Duration,
    /// Before the tile action re-runs at a relocated cell.
    pub retrigger: Duration,
    /// Correct answer, before the reward animation starts.
    pub trial_reward: Duration,
    pub advance_after_trial: Duration,
    pub advance_after_event: Duration,
    pub plain_tile: Duration,
    pub unknown_event: Duration,
    /// After a pause is acknowledged, before the next turn.
    pub pause_to_next_turn: Duration,
    /// Quick mode: an AI player confirms its own pause after this long.
    pub quick_pause_confirm: Duration,
    pub recovery: Duration,
    pub ai_roll_quick: Duration,
    pub ai_roll: Duration,
    pub ai_decision: Duration,
    pub quick_ai_apply_trial: Duration,
    pub quick_ai_apply_other: Duration,
    /// Dice-branch even result, before the three-cell move.
    pub secondary_move: Duration,
    /// Resource change window; the change is applied when it closes.
    pub resource_animation: Duration,
    /// Upper bound on one content-generation request.
    pub generation_timeout: Duration,
}

impl Timings {
    pub fn ai_roll_for(&self, mode: GameMode) -> Duration {
        if mode.is_quick() {
            self.ai_roll_quick
        } else {
            self.ai_roll
        }
    }

    pub fn quick_ai_apply_for(&self, kind: ModalKind) -> Duration {
        match kind {
            ModalKind::Trial => self.quick_ai_apply_trial,
            _ => self.quick_ai_apply_other,
        }
    }

    /// All delays collapsed to zero; scheduled order is preserved.
    pub fn instant() -> Self {
        let zero = Duration::ZERO;
        Self {
            roll: zero,
            step: zero,
            arrival_settle: zero,
            reveal: zero,
            retrigger: zero,
            trial_reward: zero,
            advance_after_trial: zero,
            advance_after_event: zero,
            plain_tile: zero,
            unknown_event: zero,
            pause_to_next_turn: zero,
            quick_pause_confirm: zero,
            recovery: zero,
            ai_roll_quick: zero,
            ai_roll: zero,
            ai_decision: zero,
            quick_ai_apply_trial: zero,
            quick_ai_apply_other: zero,
            secondary_move: zero,
            resource_animation: zero,
            generation_timeout: Duration::from_secs(20),
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        let ms = Duration::from_millis;
        Self {
            roll: ms(600),
            step: ms(500),
            arrival_settle: ms(500),
            reveal: ms(1200),
            retrigger: ms(100),
            trial_reward: ms(400),
            advance_after_trial: ms(500),
            advance_after_event: ms(500),
            plain_tile: ms(1000),
            unknown_event: ms(1200),
            pause_to_next_turn: ms(300),
            quick_pause_confirm: ms(1000),
            recovery: ms(1000),
            ai_roll_quick: ms(1000),
            ai_roll: ms(2500),
            ai_decision: ms(1500),
            quick_ai_apply_trial: ms(1200),
            quick_ai_apply_other: ms(800),
            secondary_move: ms(600),
            resource_animation: ms(1500),
            generation_timeout: Duration::from_secs(20),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_pacing_depends_on_mode() {
        let t = Timings::default();
        assert_eq!(t.ai_roll_for(GameMode::Quick), Duration::from_millis(1000));
        assert_eq!(t.ai_roll_for(GameMode::Normal), Duration::from_millis(2500));
        assert_eq!(t.ai_roll_for(GameMode::Advanced), Duration::from_millis(2500));
        assert_eq!(t.quick_ai_apply_for(ModalKind::Trial), Duration::from_millis(1200));
        assert_eq!(t.quick_ai_apply_for(ModalKind::Chance), Duration::from_millis(800));
    }
}
