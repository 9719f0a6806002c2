//! Session worker that owns the authoritative [`TurnController`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), sleeps
//! until the controller's next deadline, and publishes events plus a fresh
//! snapshot to the EventBus after every transition.

use std::sync::Arc;
use std::time::Duration;

use game_core::TrialCard;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, info, trace};

use crate::api::{GenerationError, Result, TrialGenerator};
use crate::controller::{GameSetup, GenerationRequest, Intent, SessionSnapshot, TurnController};
use crate::events::{Event, EventBus};
use crate::scheduler::Millis;

type GenerationOutcome = (u64, std::result::Result<TrialCard, GenerationError>);

/// Commands that can be sent to the session worker
pub enum Command {
    StartGame {
        setup: GameSetup,
        reply: oneshot::Sender<Result<()>>,
    },
    Intent {
        intent: Intent,
        reply: oneshot::Sender<Result<()>>,
    },
    Restart {
        reply: oneshot::Sender<()>,
    },
    /// Current snapshot (read-only).
    QuerySnapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
}

/// Background task that drives one game session.
pub struct SessionWorker {
    controller: TurnController,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    generator: Arc<dyn TrialGenerator>,
    generation_timeout: Duration,
    generation_tx: mpsc::UnboundedSender<GenerationOutcome>,
    generation_rx: mpsc::UnboundedReceiver<GenerationOutcome>,
    /// Seed for games started without one.
    seed: Option<u64>,
    /// Real instant of virtual time zero.
    origin: Instant,
}

impl SessionWorker {
    pub fn new(
        controller: TurnController,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        generator: Arc<dyn TrialGenerator>,
        generation_timeout: Duration,
    ) -> Self {
        let (generation_tx, generation_rx) = mpsc::unbounded_channel();
        info!(
            target: "runtime::worker",
            board = controller.content().board.len(),
            mode = %controller.mode(),
            "session worker initialized"
        );

        Self {
            controller,
            command_rx,
            event_bus,
            generator,
            generation_timeout,
            generation_tx,
            generation_rx,
            seed: None,
            origin: Instant::now(),
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Main worker loop. Ends when every handle is dropped.
    pub async fn run(mut self) {
        loop {
            let deadline = self
                .controller
                .next_deadline()
                .map(|at| self.origin + Duration::from_millis(at));

            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some((ticket, result)) = self.generation_rx.recv() => {
                    let now = self.elapsed();
                    self.controller.sync_clock(now);
                    self.controller.on_trial_generated(ticket, result);
                    self.flush();
                }
                () = sleep_until(deadline) => {
                    let fired = self.controller.fire_due(self.elapsed());
                    let idle = self.controller.scheduler().is_empty();
                    trace!(target: "runtime::worker", fired, idle, "scheduled actions fired");
                    self.flush();
                }
            }
        }
        debug!(target: "runtime::worker", "session worker stopped");
    }

    fn handle_command(&mut self, command: Command) {
        // Overdue actions happened before this command arrived.
        let now = self.elapsed();
        if self.controller.fire_due(now) > 0 {
            self.flush();
        }

        match command {
            Command::StartGame { mut setup, reply } => {
                setup.seed = setup.seed.or(self.seed);
                let result = self.controller.start_game(setup).map_err(Into::into);
                self.flush();
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "StartGame reply channel closed (caller dropped)");
                }
            }
            Command::Intent { intent, reply } => {
                let result = self.controller.handle(intent).map_err(Into::into);
                self.flush();
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Intent reply channel closed (caller dropped)");
                }
            }
            Command::Restart { reply } => {
                self.controller.restart();
                self.flush();
                if reply.send(()).is_err() {
                    debug!(target: "runtime::worker", "Restart reply channel closed (caller dropped)");
                }
            }
            Command::QuerySnapshot { reply } => {
                if reply.send(self.controller.snapshot()).is_err() {
                    debug!(target: "runtime::worker", "QuerySnapshot reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Publishes pending events and the new snapshot, and hands any trial
    /// request to the generator.
    fn flush(&mut self) {
        for event in self.controller.drain_events() {
            self.event_bus.publish(event);
        }
        if let Some(request) = self.controller.take_generation_request() {
            self.spawn_generation(request);
        }
        self.event_bus
            .publish(Event::Session(Box::new(self.controller.snapshot())));
    }

    fn spawn_generation(&self, request: GenerationRequest) {
        let generator = Arc::clone(&self.generator);
        let outcome_tx = self.generation_tx.clone();
        let timeout = self.generation_timeout;
        debug!(target: "runtime::generator", ticket = request.ticket, label = %request.request.label, "requesting trial");

        tokio::spawn(async move {
            let result = match tokio::time::timeout(timeout, generator.generate(&request.request))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(GenerationError::TimedOut(timeout)),
            };
            if let Err(error) = &result {
                debug!(target: "runtime::generator", ticket = request.ticket, %error, "trial generation failed");
            }
            if outcome_tx.send((request.ticket, result)).is_err() {
                debug!(target: "runtime::generator", "session ended before the trial arrived");
            }
        });
    }

    fn elapsed(&self) -> Millis {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(Millis::MAX)
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
