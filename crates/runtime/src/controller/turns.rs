use game_core::{PlayerId, TurnStart, VictoryCheck};
use tracing::{debug, info, trace};

use super::{Phase, TurnController};
use crate::api::Rejection;
use crate::events::{Event, TurnEvent};
use crate::scheduler::Task;

impl TurnController {
    /// Hands the turn to the next player.
    ///
    /// Cancels everything scheduled for the outgoing turn first. Suppressed
    /// entirely once a winner exists.
    pub(super) fn advance_turn(&mut self) {
        if self.state.is_won() {
            trace!(target: "runtime::controller", "advance suppressed after victory");
            return;
        }
        self.reset_transient();

        let Some(start) = self.transact(|engine| engine.advance_turn()) else {
            return;
        };
        debug!(target: "runtime::controller", ?start, "turn advanced");

        match start {
            TurnStart::Paused { player, turns_left } => {
                self.phase = Phase::PauseDisplay;
                self.publish_turn(start);
                self.narrate(format!(
                    "{} is resting and must sit this turn out ({} turn(s) left).",
                    self.label(player),
                    turns_left
                ));
                if self.game.mode.is_quick() && self.is_ai(player) {
                    self.schedule(
                        self.timings.quick_pause_confirm,
                        Task::PauseConfirm { player },
                    );
                }
            }
            TurnStart::Recovering { player } => {
                self.phase = Phase::Recovery;
                self.publish_turn(start);
                self.narrate(format!(
                    "{} has recovered and rejoins the journey.",
                    self.name(player)
                ));
                self.schedule(self.timings.recovery, Task::RecoveryDone { player });
            }
            TurnStart::Ready { player } => self.start_turn(player),
        }
    }

    /// The player may roll. Computer players roll after their think time.
    pub(super) fn start_turn(&mut self, player: PlayerId) {
        self.phase = Phase::Idle;
        self.publish_turn(TurnStart::Ready { player });
        info!(target: "runtime::controller", %player, "turn started");
        self.narrate(format!("{} begins their turn.", self.label(player)));

        if self.is_ai(player) {
            self.schedule(
                self.timings.ai_roll_for(self.game.mode),
                Task::AiRoll { player },
            );
        }
    }

    /// Consumes one skipped turn of the current player.
    ///
    /// `by_ai` marks the quick-mode self confirmation; a human may not confirm
    /// for a computer player in quick mode.
    pub(super) fn acknowledge_pause(&mut self, by_ai: bool) -> Result<(), Rejection> {
        let (player, is_ai) = self.ensure_playing()?;
        if self.phase != Phase::PauseDisplay {
            return Err(Rejection::NotPaused);
        }
        if !by_ai && is_ai && self.game.mode.is_quick() {
            return Err(Rejection::AiTurn { player });
        }

        let ack = self
            .transact(|engine| engine.acknowledge_pause())
            .ok_or(Rejection::NotPaused)?;
        debug!(target: "runtime::controller", ?ack, "pause acknowledged");

        self.schedule_advance(self.timings.pause_to_next_turn);
        Ok(())
    }

    pub(super) fn recovery_done(&mut self, player: PlayerId) {
        if self.phase != Phase::Recovery || !self.state.is_current(player) {
            trace!(target: "runtime::controller", %player, "recovery no longer current");
            return;
        }
        if let Some(start) = self.transact(|engine| engine.finish_recovery(player)) {
            self.start_turn(start.player());
        }
    }

    /// Runs the Victory Detector. Returns true when the game is (now) over.
    pub(super) fn check_win(&mut self) -> bool {
        match self.transact(|engine| Ok(engine.check_victory())) {
            Some(VictoryCheck::Declared(winner)) => {
                self.declare_win(winner);
                true
            }
            Some(VictoryCheck::AlreadyDeclared(_)) => true,
            Some(VictoryCheck::NoWinner) | None => false,
        }
    }

    fn declare_win(&mut self, winner: PlayerId) {
        self.reset_transient();
        self.phase = Phase::GameOver;
        let meat = self.state.player(winner).map_or(0, |p| p.meat);
        info!(target: "runtime::controller", %winner, meat, "victory");
        self.narrate(format!(
            "{} is the first to collect {} meat and completes the journey!",
            self.name(winner),
            meat
        ));
    }

    fn publish_turn(&mut self, start: TurnStart) {
        self.events.push(Event::Turn(TurnEvent {
            player: start.player(),
            start,
        }));
    }
}
