//! Encounter Resolver: tile actions, card modals and their effects.

use std::time::Duration;

use game_core::{
    CardEffect, ChanceCard, ChanceEffect, EffectOutcome, EventCard, EventEffect, FateCard, Modal,
    Placement, PlayerId, TRIAL_OPTIONS, TileKind, TrialCard,
};
use tracing::{debug, info, trace, warn};

use super::{
    Animation, DRAW_BRANCH, DRAW_CARD, GenerationRequest, PendingGeneration, Phase, Settle,
    TurnController,
};
use crate::api::{GenerationError, Rejection, TrialRequest};
use crate::scheduler::{RevealKind, Task};

impl TurnController {
    /// Runs the encounter of the tile under the current player.
    pub(super) fn tile_action(&mut self, player: PlayerId) {
        if !self.state.is_current(player) {
            trace!(target: "runtime::controller", %player, "tile action for a displaced player");
            return;
        }
        let Some(position) = self.state.player(player).map(|p| p.position) else {
            return;
        };
        let Some(tile) = self.content.board.tile(position).cloned() else {
            debug!(target: "runtime::controller", position, "no tile at position");
            self.schedule_advance(Duration::ZERO);
            return;
        };

        info!(target: "runtime::controller", %player, position, kind = %tile.kind, "tile action");
        self.narrate(format!("{} arrives at {}.", self.name(player), tile.name));

        match tile.kind {
            TileKind::State => self.begin_trial(player, tile.theme()),
            TileKind::Fate => self.begin_reveal(player, RevealKind::Fate),
            TileKind::Chance => self.begin_reveal(player, RevealKind::Chance),
            TileKind::Event => match self.content.events.lookup(&tile.name).cloned() {
                Some(card) => self.open_card(player, Modal::EventDetail(card)),
                None => self.schedule_advance(self.timings.unknown_event),
            },
            TileKind::Plain => self.schedule_advance(self.timings.plain_tile),
        }
    }

    fn begin_trial(&mut self, player: PlayerId, theme: &str) {
        if !self.game.mode.generates_trials() {
            match self.draw_trial() {
                Some(card) => self.open_card(player, Modal::Trial(card)),
                None => self.schedule_advance(Duration::ZERO),
            }
            return;
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending_generation = Some(PendingGeneration {
            ticket,
            player,
            epoch: self.scheduler.epoch(),
        });
        self.outgoing_request = Some(GenerationRequest {
            ticket,
            request: TrialRequest::new(theme),
        });
        self.phase = Phase::Generating;
        debug!(target: "runtime::generator", ticket, theme, "trial generation requested");
        self.narrate(format!("Composing a trial about {theme}..."));
    }

    /// Completes a generation request raised by a State tile.
    ///
    /// Results for a ticket that is no longer pending (restart, turn moved on)
    /// are dropped. Failures fall back to the static deck.
    pub fn on_trial_generated(
        &mut self,
        ticket: u64,
        result: Result<TrialCard, GenerationError>,
    ) {
        let Some(pending) = self.pending_generation.filter(|p| p.ticket == ticket) else {
            trace!(target: "runtime::generator", ticket, "stale generation result ignored");
            return;
        };
        if pending.epoch != self.scheduler.epoch()
            || self.phase != Phase::Generating
            || !self.state.is_current(pending.player)
        {
            trace!(target: "runtime::generator", ticket, "generation no longer awaited");
            return;
        }
        self.pending_generation = None;

        let generated = result.and_then(|card| {
            if card.answer_index >= TRIAL_OPTIONS {
                return Err(GenerationError::AnswerOutOfRange(card.answer_index as i64));
            }
            if card.question.trim().is_empty() {
                return Err(GenerationError::EmptyField("question"));
            }
            Ok(card)
        });

        let card = match generated {
            Ok(card) => {
                info!(target: "runtime::generator", ticket, "generated trial ready");
                self.narrate("A new trial has been composed.".to_string());
                Some(TrialCard {
                    id: ticket,
                    generated: true,
                    ..card
                })
            }
            Err(error) => {
                warn!(target: "runtime::generator", ticket, %error, "generation failed, using static deck");
                self.narrate(format!(
                    "The trial could not be composed ({error}); a classic trial is used instead."
                ));
                self.draw_trial()
            }
        };

        match card {
            Some(card) => self.open_card(pending.player, Modal::Trial(card)),
            None => self.schedule_advance(Duration::ZERO),
        }
    }

    fn begin_reveal(&mut self, player: PlayerId, kind: RevealKind) {
        self.phase = Phase::Revealing;
        self.reveal = Some(kind);
        self.schedule(self.timings.reveal, Task::Reveal { player, kind });
    }

    pub(super) fn reveal_card(&mut self, player: PlayerId, kind: RevealKind) {
        if self.phase != Phase::Revealing || !self.state.is_current(player) {
            trace!(target: "runtime::controller", %player, %kind, "reveal no longer current");
            return;
        }
        self.reveal = None;
        let modal = match kind {
            RevealKind::Fate => self.draw_fate().map(Modal::Fate),
            RevealKind::Chance => self.draw_chance().map(Modal::Chance),
        };
        match modal {
            Some(modal) => self.open_card(player, modal),
            None => self.schedule_advance(Duration::ZERO),
        }
    }

    fn draw_trial(&mut self) -> Option<TrialCard> {
        let seed = self.draw_seed(DRAW_CARD);
        let index = self.oracle.pick(seed, self.content.decks.trials.len());
        self.content.decks.trials.get(index).cloned()
    }

    fn draw_fate(&mut self) -> Option<FateCard> {
        let seed = self.draw_seed(DRAW_CARD);
        let index = self.oracle.pick(seed, self.content.decks.fates.len());
        self.content.decks.fates.get(index).cloned()
    }

    fn draw_chance(&mut self) -> Option<ChanceCard> {
        let seed = self.draw_seed(DRAW_CARD);
        let index = self.oracle.pick(seed, self.content.decks.chances.len());
        self.content.decks.chances.get(index).cloned()
    }

    fn open_card(&mut self, player: PlayerId, modal: Modal) {
        let kind = modal.kind();
        if self.transact(|engine| engine.open_modal(modal)).is_none() {
            self.schedule_advance(Duration::ZERO);
            return;
        }
        self.phase = Phase::ModalOpen;
        debug!(target: "runtime::controller", %player, ?kind, "modal opened");

        if self.is_ai(player) {
            self.schedule(self.timings.ai_decision, Task::AiDecide { player });
        }
    }

    /// Human selection of a trial option. The selection is locked once made.
    pub(super) fn select_option(&mut self, choice: usize) -> Result<(), Rejection> {
        let (player, is_ai) = self.ensure_playing()?;
        if is_ai {
            return Err(Rejection::AiTurn { player });
        }
        match &self.state.modal {
            Modal::Trial(_) => {}
            Modal::None => return Err(Rejection::NoModal),
            _ => return Err(Rejection::NoTrial),
        }
        if self.phase != Phase::ModalOpen {
            return Err(Rejection::Busy { phase: self.phase });
        }
        if self.state.trial_selection.is_some() {
            return Err(Rejection::SelectionLocked);
        }
        if choice >= TRIAL_OPTIONS {
            return Err(Rejection::InvalidOption { choice });
        }

        self.transact(|engine| engine.select_trial_option(choice))
            .ok_or(Rejection::InvalidOption { choice })?;
        self.narrate(format!(
            "{} picks option {}.",
            self.name(player),
            TrialCard::option_letter(choice)
        ));
        Ok(())
    }

    /// Resolves the open card, or confirms a computer player's pending decision.
    pub(super) fn acknowledge_modal(&mut self) -> Result<(), Rejection> {
        let (player, is_ai) = self.ensure_playing()?;
        if !self.state.modal.is_open() {
            return Err(Rejection::NoModal);
        }
        if self.phase != Phase::ModalOpen {
            return Err(Rejection::Busy { phase: self.phase });
        }

        if is_ai {
            if !self.state.awaiting_confirmation {
                return Err(Rejection::AwaitingAi);
            }
            self.transact(|engine| Ok(engine.take_ai_decision()));
        } else if matches!(self.state.modal, Modal::Trial(_))
            && self.state.trial_selection.is_none()
        {
            return Err(Rejection::NoSelection);
        }

        self.resolve_modal(player);
        Ok(())
    }

    /// Applies the open card for `player`. The trial uses the already locked
    /// selection.
    pub(super) fn resolve_modal(&mut self, player: PlayerId) {
        match self.state.modal.clone() {
            Modal::Trial(card) => match self.state.trial_selection {
                Some(choice) => self.resolve_trial(player, &card, choice),
                None => debug!(target: "runtime::controller", %player, "trial without a selection"),
            },
            Modal::Fate(card) => self.resolve_fate(player, card),
            Modal::Chance(card) => self.resolve_chance(player, card),
            Modal::EventDetail(card) => self.resolve_event(player, card),
            Modal::None | Modal::Win { .. } => {
                debug!(target: "runtime::controller", %player, "nothing to resolve");
            }
        }
    }

    fn close_modal(&mut self) {
        self.transact(|engine| {
            engine.clear_encounter();
            Ok(())
        });
    }

    fn resolve_trial(&mut self, player: PlayerId, card: &TrialCard, choice: usize) {
        let correct = card.is_correct(choice);
        let letter = TrialCard::option_letter(choice);
        if correct {
            self.narrate(format!(
                "{} chose {letter}: correct! One meat awarded.",
                self.name(player)
            ));
        } else {
            self.narrate(format!(
                "{} chose {letter}: incorrect. The answer was {}.",
                self.name(player),
                TrialCard::option_letter(card.answer_index)
            ));
        }
        info!(target: "runtime::controller", %player, choice, correct, "trial resolved");
        self.close_modal();

        if correct {
            self.phase = Phase::Resolving;
            self.schedule(self.timings.trial_reward, Task::TrialReward { player });
        } else {
            self.schedule_advance(self.timings.advance_after_trial);
        }
    }

    pub(super) fn trial_reward(&mut self, player: PlayerId) {
        if !self.state.is_current(player) {
            return;
        }
        self.start_animation(player, 1, Settle::TrialReward);
    }

    fn resolve_fate(&mut self, player: PlayerId, card: FateCard) {
        self.narrate(format!(
            "{} draws Fate: {}. {}",
            self.name(player),
            card.title,
            card.description
        ));
        self.close_modal();
        self.apply_effect_staged(player, card.effect);
    }

    fn resolve_chance(&mut self, player: PlayerId, card: ChanceCard) {
        self.narrate(format!(
            "{} faces Chance: {}. {}",
            self.name(player),
            card.title,
            card.challenge
        ));
        self.close_modal();

        match card.effect {
            ChanceEffect::Fixed(effect) => self.apply_effect_staged(player, effect),
            ChanceEffect::DiceBranch => {
                let seed = self.draw_seed(DRAW_BRANCH);
                let roll = self.oracle.roll_die(seed, 6);
                if roll % 2 == 1 {
                    self.narrate(format!(
                        "{} rolls a {roll}: the road is hard. Rest a turn and lose one meat.",
                        self.name(player)
                    ));
                    self.apply_effect_staged(player, CardEffect::meat(-1).with_pause());
                } else {
                    self.narrate(format!(
                        "{} rolls a {roll}: gain one meat and press on three cells.",
                        self.name(player)
                    ));
                    self.start_animation(player, 1, Settle::DiceBranchEven);
                }
            }
        }
    }

    fn resolve_event(&mut self, player: PlayerId, card: EventCard) {
        self.narrate(format!(
            "{} witnesses {}: {}.",
            self.name(player),
            card.title,
            card.effect_label
        ));
        self.close_modal();

        match card.effect {
            EventEffect::GainMeat => self.start_animation(player, 1, Settle::EventReward),
            EventEffect::LoseMeat => self.start_animation(player, -1, Settle::EventReward),
            EventEffect::Pause => {
                self.transact(|engine| engine.impose_pause(player));
                self.schedule_advance(self.timings.advance_after_event);
            }
            EventEffect::None => self.schedule_advance(self.timings.advance_after_event),
        }
    }

    /// Fate/Chance effects with a resource delta pass through the animation
    /// window first; the whole effect lands when it closes.
    fn apply_effect_staged(&mut self, player: PlayerId, effect: CardEffect) {
        let amount = effect.meat;
        if amount == 0 {
            self.finalize_effect(player, effect);
        } else {
            self.start_animation(player, amount, Settle::CardEffect(effect));
        }
    }

    /// Opens the resource animation window. A zero amount settles at once.
    pub(super) fn start_animation(&mut self, player: PlayerId, amount: i32, settle: Settle) {
        if self.state.is_won() {
            return;
        }
        self.animation = Some(Animation {
            player,
            amount,
            settle,
        });
        if amount == 0 {
            self.animation_settled(player);
            return;
        }
        self.phase = Phase::Animating;
        self.schedule(
            self.timings.resource_animation,
            Task::AnimationSettled { player },
        );
    }

    pub(super) fn animation_settled(&mut self, player: PlayerId) {
        let Some(animation) = self.animation.take_if(|a| a.player == player) else {
            trace!(target: "runtime::controller", %player, "no animation to settle");
            return;
        };

        match animation.settle {
            Settle::PassBonus => {
                self.transact(|engine| engine.apply_meat(player, animation.amount));
                if !self.check_win() {
                    self.tile_action(player);
                }
            }
            Settle::TrialReward => {
                self.transact(|engine| engine.apply_meat(player, animation.amount));
                if !self.check_win() {
                    self.schedule_advance(self.timings.advance_after_trial);
                }
            }
            Settle::EventReward => {
                self.transact(|engine| engine.apply_meat(player, animation.amount));
                if !self.check_win() {
                    self.advance_turn();
                }
            }
            Settle::CardEffect(effect) => self.finalize_effect(player, effect),
            Settle::DiceBranchEven => {
                self.transact(|engine| engine.apply_meat(player, animation.amount));
                if !self.check_win() {
                    self.phase = Phase::Resolving;
                    self.schedule(self.timings.secondary_move, Task::SecondaryMove { player });
                }
            }
        }
    }

    /// Applies a whole card effect, then either re-triggers the tile action
    /// at the new cell or advances the turn. Never both.
    fn finalize_effect(&mut self, player: PlayerId, effect: CardEffect) {
        let len = self.content.board.len();
        let Some((change, outcome)) =
            self.transact(|engine| engine.apply_card_effect(player, &effect, len))
        else {
            self.schedule_advance(Duration::ZERO);
            return;
        };
        debug!(target: "runtime::controller", %player, applied = change.applied(), ?outcome, "card effect applied");

        let name = self.name(player);
        if effect.pause {
            self.narrate(format!("{name} must rest and will miss a turn."));
        }
        if effect.protection {
            self.narrate(format!("{name} is now under protection."));
        }
        match (&effect.placement, outcome) {
            (Placement::Stay, _) => {}
            (Placement::Teleport(cell), _) => {
                let tile = self
                    .content
                    .board
                    .tile(*cell)
                    .map_or_else(|| cell.to_string(), |t| t.name.clone());
                self.narrate(format!("{name} is sent to {tile}."));
            }
            (Placement::SwapOrReset { target }, EffectOutcome::Advance) => {
                self.narrate(format!("{name} trades places with {target}."));
            }
            (Placement::SwapOrReset { target }, EffectOutcome::Retrigger { .. }) => {
                self.narrate(format!(
                    "{target} is not on the road, so {name} returns to Lu."
                ));
            }
        }

        if self.check_win() {
            return;
        }
        match outcome {
            EffectOutcome::Advance => self.advance_turn(),
            EffectOutcome::Retrigger { cell } => {
                debug!(target: "runtime::controller", %player, cell, "tile action re-triggered");
                self.phase = Phase::Resolving;
                self.schedule(self.timings.retrigger, Task::TileAction { player });
            }
        }
    }
}
