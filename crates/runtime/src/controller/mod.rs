//! Turn Controller: the timer-driven session state machine.
//!
//! [`TurnController`] owns the authoritative [`GameState`] and a
//! [`Scheduler`] of named delayed actions on a virtual millisecond clock. It
//! never sleeps: callers advance the clock (`fire_due`, `fire_next`) and feed
//! it intents. Each handler runs to completion, mutates the state through a
//! single [`GameEngine`] transform on a working copy, and commits the copy
//! only when the transform succeeds.
//!
//! The flow is split by component:
//! - [`movement`] rolls and paces steps around the track
//! - [`encounter`] resolves the tile a player lands on
//! - [`arbiter`] acts for computer-controlled players
//! - [`turns`] hands the turn over, including pause and recovery, and victory
//! - [`snapshot`] renders the state for observers
mod arbiter;
mod encounter;
mod movement;
mod snapshot;
mod turns;

pub use snapshot::{AnimationView, SessionSnapshot};

use std::sync::Arc;
use std::time::Duration;

use game_content::{Content, ContentError};
use game_core::{
    CardEffect, EngineError, GameConfig, GameEngine, GameMode, GameState, PlayerId, PlayerSetup,
    RngOracle, Route,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::api::{Rejection, TrialRequest};
use crate::events::{Event, LogEvent};
use crate::scheduler::{Due, Millis, RevealKind, Scheduler, Task};
use crate::timing::Timings;

/// Coarse state of the board. Anything but `Idle` means the board is busy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    NotStarted,
    /// Waiting for the current player to roll.
    Idle,
    Rolling,
    Moving,
    /// Fate/Chance reveal before the card is drawn.
    Revealing,
    /// Waiting on the content generator.
    Generating,
    ModalOpen,
    /// An encounter is resolved; the follow-up is scheduled.
    Resolving,
    /// Resource change window.
    Animating,
    PauseDisplay,
    Recovery,
    GameOver,
}

/// Roster and per-game overrides supplied when a game starts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSetup {
    pub roster: Vec<PlayerSetup>,
    pub win_condition: Option<u32>,
    pub mode: Option<GameMode>,
    /// Fixed seed for a reproducible session; random when absent.
    pub seed: Option<u64>,
}

impl GameSetup {
    pub fn new(roster: Vec<PlayerSetup>) -> Self {
        Self {
            roster,
            ..Self::default()
        }
    }

    pub fn with_win_condition(mut self, win_condition: u32) -> Self {
        self.win_condition = Some(win_condition);
        self
    }

    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Player input accepted while a game is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Roll,
    SelectOption(usize),
    /// Resolve the open card, or confirm a pending computer decision.
    AcknowledgeModal,
    AcknowledgePause,
}

/// A trial the worker must ask the content generator for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub ticket: u64,
    pub request: TrialRequest,
}

// Seed contexts, one per independent draw of a single step.
const DRAW_DIE_A: u32 = 0;
const DRAW_DIE_B: u32 = 1;
const DRAW_CARD: u32 = 2;
const DRAW_AI_CHOICE: u32 = 3;
const DRAW_BRANCH: u32 = 4;

#[derive(Clone, Copy, Debug)]
struct Movement {
    player: PlayerId,
    remaining: u32,
    route: Route,
}

/// What happens when a resource animation closes.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Settle {
    /// Credit the lap bonus, then run the tile action.
    PassBonus,
    /// Correct trial answer; advance after a beat.
    TrialReward,
    /// Event gain/lose; advance immediately.
    EventReward,
    /// Apply a whole Fate/Chance effect (its delta is the animated amount).
    CardEffect(CardEffect),
    /// Dice-branch even roll; the secondary move follows.
    DiceBranchEven,
}

#[derive(Clone, Debug)]
struct Animation {
    player: PlayerId,
    amount: i32,
    settle: Settle,
}

#[derive(Clone, Copy, Debug)]
struct PendingGeneration {
    ticket: u64,
    player: PlayerId,
    epoch: u64,
}

pub struct TurnController {
    /// Configuration the controller was built with; restored on restart.
    base_config: GameConfig,
    /// Configuration of the game in progress, with per-game overrides.
    game: GameConfig,
    timings: Timings,
    content: Content,
    oracle: Arc<dyn RngOracle>,
    state: GameState,
    phase: Phase,
    scheduler: Scheduler,
    now: Millis,
    movement: Option<Movement>,
    animation: Option<Animation>,
    reveal: Option<RevealKind>,
    pending_generation: Option<PendingGeneration>,
    outgoing_request: Option<GenerationRequest>,
    next_ticket: u64,
    events: Vec<Event>,
}

impl TurnController {
    /// Creates a controller with no game in progress.
    pub fn new(
        config: GameConfig,
        timings: Timings,
        content: Content,
        oracle: Arc<dyn RngOracle>,
    ) -> Result<Self, ContentError> {
        content.decks.validate(content.board.len())?;
        Ok(Self {
            state: GameState::empty(config.log_capacity),
            game: config.clone(),
            base_config: config,
            timings,
            content,
            oracle,
            phase: Phase::NotStarted,
            scheduler: Scheduler::new(),
            now: 0,
            movement: None,
            animation: None,
            reveal: None,
            pending_generation: None,
            outgoing_request: None,
            next_ticket: 1,
            events: Vec::new(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> GameMode {
        self.game.mode
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Deadline of the earliest scheduled action.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.scheduler.next_due()
    }

    /// Moves the clock forward without firing anything.
    pub fn sync_clock(&mut self, now: Millis) {
        self.now = self.now.max(now);
    }

    /// Fires every action due at or before `now`, in deadline order.
    pub fn fire_due(&mut self, now: Millis) -> usize {
        let mut fired = 0;
        while let Some(due) = self.scheduler.pop_due(now) {
            self.sync_clock(due.at);
            self.dispatch(due);
            fired += 1;
        }
        self.sync_clock(now);
        fired
    }

    /// Jumps the clock to the earliest action and fires it.
    pub fn fire_next(&mut self) -> Option<Task> {
        let due = self.scheduler.pop_next()?;
        self.sync_clock(due.at);
        let task = due.task;
        self.dispatch(due);
        Some(task)
    }

    /// Events produced since the last drain, in order.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// The generation request raised by the last State tile, if any.
    pub fn take_generation_request(&mut self) -> Option<GenerationRequest> {
        self.outgoing_request.take()
    }

    /// Starts a new game. Only allowed when no game is in progress.
    pub fn start_game(&mut self, setup: GameSetup) -> Result<(), Rejection> {
        if self.phase != Phase::NotStarted {
            return Err(Rejection::AlreadyStarted);
        }

        let mut game = self.base_config.clone();
        if let Some(win_condition) = setup.win_condition {
            game.win_condition = win_condition;
        }
        if let Some(mode) = setup.mode {
            game.mode = mode;
        }
        let seed = setup.seed.unwrap_or_else(rand::random);
        let state = GameState::from_setup(&game, &setup.roster, seed).map_err(Rejection::Setup)?;

        self.reset_transient();
        self.game = game;
        self.state = state;
        info!(
            target: "runtime::controller",
            players = self.state.players.len(),
            mode = %self.game.mode,
            win_condition = self.game.win_condition,
            seed,
            "game started"
        );
        self.narrate(format!(
            "The journey begins in {} mode. The first to collect {} meat wins.",
            self.game.mode, self.game.win_condition
        ));

        match self.state.current_player().map(|p| p.id) {
            Some(first) => self.start_turn(first),
            None => debug!(target: "runtime::controller", "started with an empty roster"),
        }
        Ok(())
    }

    /// Cancels everything and returns to the not-started state.
    pub fn restart(&mut self) {
        self.reset_transient();
        self.state = GameState::empty(self.base_config.log_capacity);
        self.game = self.base_config.clone();
        self.phase = Phase::NotStarted;
        info!(target: "runtime::controller", "session restarted");
        self.narrate("The game has been restarted.".to_string());
    }

    /// Applies a player intent.
    pub fn handle(&mut self, intent: Intent) -> Result<(), Rejection> {
        let result = match intent {
            Intent::Roll => self.request_roll(),
            Intent::SelectOption(choice) => self.select_option(choice),
            Intent::AcknowledgeModal => self.acknowledge_modal(),
            Intent::AcknowledgePause => self.acknowledge_pause(false),
        };
        if let Err(rejection) = &result {
            debug!(target: "runtime::controller", ?intent, %rejection, "intent rejected");
        }
        result
    }

    fn dispatch(&mut self, due: Due) {
        if due.epoch != self.scheduler.epoch() {
            trace!(target: "runtime::controller", task = %due.task, "stale task ignored");
            return;
        }
        if self.state.is_won() {
            trace!(target: "runtime::controller", task = %due.task, "task after victory ignored");
            return;
        }

        match due.task {
            Task::SettleRoll { player } => self.settle_roll(player),
            Task::MoveStep { player } => self.move_step(player),
            Task::FinishMove { player } => self.finish_move(player),
            Task::TileAction { player } => self.tile_action(player),
            Task::Reveal { player, kind } => self.reveal_card(player, kind),
            Task::AnimationSettled { player } => self.animation_settled(player),
            Task::TrialReward { player } => self.trial_reward(player),
            Task::SecondaryMove { player } => self.secondary_move(player),
            Task::AdvanceTurn => self.advance_turn(),
            Task::AiRoll { player } => self.ai_roll(player),
            Task::AiDecide { player } => self.ai_decide(player),
            Task::AiApply { player } => self.ai_apply(player),
            Task::PauseConfirm { player } => self.ai_confirm_pause(player),
            Task::RecoveryDone { player } => self.recovery_done(player),
        }
    }

    /// Runs one engine transform on a working copy and commits it on success.
    fn transact<T>(
        &mut self,
        op: impl FnOnce(&mut GameEngine<'_>) -> Result<T, EngineError>,
    ) -> Option<T> {
        let mut working = self.state.clone();
        match op(&mut GameEngine::new(&mut working)) {
            Ok(value) => {
                self.state = working;
                Some(value)
            }
            Err(error) => {
                debug!(target: "runtime::controller", %error, phase = %self.phase, "transform rejected");
                None
            }
        }
    }

    fn schedule(&mut self, delay: Duration, task: Task) {
        self.scheduler.schedule(self.now, delay, task);
    }

    /// Schedules the single turn hand-over of this cycle.
    fn schedule_advance(&mut self, delay: Duration) {
        if self.scheduler.contains(Task::AdvanceTurn) {
            debug!(target: "runtime::controller", "turn advance already pending");
            return;
        }
        self.phase = Phase::Resolving;
        self.schedule(delay, Task::AdvanceTurn);
    }

    fn reset_transient(&mut self) {
        self.scheduler.reset();
        self.movement = None;
        self.animation = None;
        self.reveal = None;
        self.pending_generation = None;
        self.outgoing_request = None;
    }

    fn narrate(&mut self, message: String) {
        self.state.push_log(message.clone());
        self.events.push(Event::Log(LogEvent { message }));
    }

    fn name(&self, id: PlayerId) -> String {
        self.state
            .player(id)
            .map_or_else(|| id.to_string(), |p| p.character.clone())
    }

    fn label(&self, id: PlayerId) -> String {
        self.state
            .player(id)
            .map_or_else(|| id.to_string(), |p| p.label())
    }

    fn is_ai(&self, id: PlayerId) -> bool {
        self.state.player(id).is_some_and(|p| p.is_ai)
    }

    /// Current player for an intent, or why there is none.
    fn ensure_playing(&self) -> Result<(PlayerId, bool), Rejection> {
        if self.phase == Phase::NotStarted {
            return Err(Rejection::NotStarted);
        }
        if let Some(winner) = self.state.winner {
            return Err(Rejection::GameOver { winner });
        }
        self.state
            .current_player()
            .map(|p| (p.id, p.is_ai))
            .ok_or(Rejection::NotStarted)
    }

    fn draw_seed(&mut self, context: u32) -> u64 {
        self.state.next_draw_seed(context)
    }
}
