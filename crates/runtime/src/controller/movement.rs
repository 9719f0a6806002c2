//! Rolling and step-by-step movement.

use game_core::{Board, PlayerId, plan_route};
use tracing::{debug, trace};

use super::{DRAW_DIE_A, DRAW_DIE_B, Movement, Phase, Settle, TurnController};
use crate::api::Rejection;
use crate::scheduler::Task;

/// Cells covered by the dice-branch bonus move.
const SECONDARY_STEPS: u32 = 3;

impl TurnController {
    /// Human roll request for the current player.
    pub(super) fn request_roll(&mut self) -> Result<(), Rejection> {
        let (player, is_ai) = self.ensure_playing()?;
        if is_ai {
            return Err(Rejection::AiTurn { player });
        }
        self.try_roll(player)
    }

    pub(super) fn try_roll(&mut self, player: PlayerId) -> Result<(), Rejection> {
        if self.phase != Phase::Idle {
            return Err(Rejection::Busy { phase: self.phase });
        }
        if let Some(paused) = self.state.player(player).filter(|p| p.is_skipping()) {
            let turns_left = paused.turns_to_skip;
            self.narrate(format!(
                "{} is paused and cannot roll this turn.",
                self.name(player)
            ));
            return Err(Rejection::Paused { player, turns_left });
        }

        self.phase = Phase::Rolling;
        self.schedule(self.timings.roll, Task::SettleRoll { player });
        Ok(())
    }

    pub(super) fn settle_roll(&mut self, player: PlayerId) {
        if self.phase != Phase::Rolling || !self.state.is_current(player) {
            trace!(target: "runtime::controller", %player, "roll no longer current");
            return;
        }

        let seeds = [self.draw_seed(DRAW_DIE_A), self.draw_seed(DRAW_DIE_B)];
        let dice = seeds.map(|seed| self.oracle.roll_die(seed, 6));
        let Some(total) = self.transact(|engine| engine.record_roll(dice)) else {
            return;
        };

        self.narrate(format!(
            "{} rolled {}+{}={} and sets off.",
            self.name(player),
            dice[0],
            dice[1],
            total
        ));
        self.begin_move(player, total);
    }

    /// Starts a paced move of `steps` cells. The route is planned up front;
    /// the steps only walk it.
    pub(super) fn begin_move(&mut self, player: PlayerId, steps: u32) {
        let start = self.state.player(player).map_or(Board::START, |p| p.position);
        let route = plan_route(start, steps, self.content.board.len());
        debug!(
            target: "runtime::controller",
            %player,
            start,
            steps,
            destination = route.final_position,
            passes = route.passes,
            "move planned"
        );

        self.phase = Phase::Moving;
        self.movement = Some(Movement {
            player,
            remaining: steps,
            route,
        });
        if steps == 0 {
            self.complete_move(player);
        } else {
            self.schedule(self.timings.step, Task::MoveStep { player });
        }
    }

    pub(super) fn move_step(&mut self, player: PlayerId) {
        let Some(mut movement) = self.movement.filter(|m| m.player == player) else {
            trace!(target: "runtime::controller", %player, "no move in progress");
            return;
        };

        let len = self.content.board.len();
        if self
            .transact(|engine| engine.step_forward(player, len))
            .is_none()
        {
            self.movement = None;
            self.schedule_advance(self.timings.arrival_settle);
            return;
        }

        movement.remaining = movement.remaining.saturating_sub(1);
        self.movement = Some(movement);

        if movement.remaining > 0 {
            self.schedule(self.timings.step, Task::MoveStep { player });
        } else {
            self.complete_move(player);
        }
    }

    /// Last step taken: credit the lap bonus or settle before the tile action.
    fn complete_move(&mut self, player: PlayerId) {
        let passes = self.movement.take().map_or(0, |m| m.route.passes);
        trace!(target: "runtime::controller", %player, passes, "move complete");

        if passes > 0 && self.state.is_current(player) {
            let bonus = passes.saturating_mul(self.game.pass_bonus_per_lap);
            self.narrate(format!(
                "{} passes through Lu and collects {} meat from home.",
                self.name(player),
                bonus
            ));
            let amount = i32::try_from(bonus).unwrap_or(i32::MAX);
            self.start_animation(player, amount, Settle::PassBonus);
        } else {
            self.schedule(self.timings.arrival_settle, Task::FinishMove { player });
        }
    }

    /// Displaced players never trigger a tile action; the turn moves on instead.
    pub(super) fn finish_move(&mut self, player: PlayerId) {
        if self.state.is_current(player) {
            self.tile_action(player);
        } else {
            self.advance_turn();
        }
    }

    pub(super) fn secondary_move(&mut self, player: PlayerId) {
        if !self.state.is_current(player) {
            trace!(target: "runtime::controller", %player, "secondary move no longer current");
            return;
        }
        self.begin_move(player, SECONDARY_STEPS);
    }
}
