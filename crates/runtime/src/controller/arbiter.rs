//! AI Arbiter: the scheduled roll and modal decision of computer players.
//!
//! Every action re-checks that its player still holds the turn and that the
//! board is where it was when the action was scheduled.

use game_core::{AiDecision, Modal, PlayerId, TRIAL_OPTIONS, TrialCard};
use tracing::{debug, trace};

use super::{DRAW_AI_CHOICE, Phase, TurnController};
use crate::scheduler::Task;

impl TurnController {
    pub(super) fn ai_roll(&mut self, player: PlayerId) {
        if !self.is_ai_turn(player) || self.phase != Phase::Idle {
            trace!(target: "runtime::controller", %player, "ai roll superseded");
            return;
        }
        if let Err(rejection) = self.try_roll(player) {
            debug!(target: "runtime::controller", %player, %rejection, "ai roll refused");
        }
    }

    pub(super) fn ai_decide(&mut self, player: PlayerId) {
        if !self.is_ai_turn(player)
            || self.phase != Phase::ModalOpen
            || self.state.ai_decision.is_some()
            || self.state.trial_selection.is_some()
        {
            trace!(target: "runtime::controller", %player, "ai decision superseded");
            return;
        }

        let label = self.label(player);
        let decision = match self.state.modal.clone() {
            Modal::Trial(_) => {
                let seed = self.draw_seed(DRAW_AI_CHOICE);
                let choice = self.oracle.pick(seed, TRIAL_OPTIONS);
                if self
                    .transact(|engine| engine.select_trial_option(choice))
                    .is_none()
                {
                    return;
                }
                self.narrate(format!(
                    "{label} studies the options and picks {}.",
                    TrialCard::option_letter(choice)
                ));
                AiDecision::Trial { choice }
            }
            Modal::Fate(card) => {
                let message = format!("{label} accepts the Fate card \"{}\".", card.title);
                self.narrate(message);
                AiDecision::Accept
            }
            Modal::Chance(card) => {
                let message = format!("{label} takes on the Chance \"{}\".", card.title);
                self.narrate(message);
                AiDecision::Accept
            }
            Modal::EventDetail(card) => {
                let message = format!("{label} reflects on \"{}\".", card.title);
                self.narrate(message);
                AiDecision::Accept
            }
            Modal::None | Modal::Win { .. } => return,
        };

        let quick = self.game.mode.is_quick();
        let kind = self.state.modal.kind();
        if self
            .transact(|engine| engine.record_ai_decision(decision, !quick))
            .is_none()
        {
            return;
        }

        if quick && let Some(kind) = kind {
            self.schedule(
                self.timings.quick_ai_apply_for(kind),
                Task::AiApply { player },
            );
        } else {
            self.narrate("Waiting for confirmation of the AI's decision.".to_string());
        }
    }

    pub(super) fn ai_apply(&mut self, player: PlayerId) {
        if !self.is_ai_turn(player) || self.phase != Phase::ModalOpen {
            trace!(target: "runtime::controller", %player, "ai apply superseded");
            return;
        }
        let taken = self.transact(|engine| Ok(engine.take_ai_decision()));
        if !matches!(taken, Some(Some(_))) {
            debug!(target: "runtime::controller", %player, "no ai decision to apply");
            return;
        }
        self.resolve_modal(player);
    }

    pub(super) fn ai_confirm_pause(&mut self, player: PlayerId) {
        if !self.is_ai_turn(player) || self.phase != Phase::PauseDisplay {
            trace!(target: "runtime::controller", %player, "pause confirm superseded");
            return;
        }
        if let Err(rejection) = self.acknowledge_pause(true) {
            debug!(target: "runtime::controller", %player, %rejection, "ai pause confirm refused");
        }
    }

    fn is_ai_turn(&self, player: PlayerId) -> bool {
        self.state.is_current(player) && self.is_ai(player) && !self.state.is_won()
    }
}
