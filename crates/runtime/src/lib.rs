//! Runtime orchestration for the timer-driven board-game session.
//!
//! This crate wires the deterministic rules of `game-core` and the content of
//! `game-content` into a paced session: a synchronous [`TurnController`] on a
//! virtual clock, a worker task that maps that clock onto real timers, and a
//! cloneable [`RuntimeHandle`] for clients.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`controller`] is the turn/encounter state machine itself
//! - [`scheduler`] and [`timing`] hold the named delayed actions and their delays
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod controller;
pub mod events;
pub mod runtime;
pub mod scheduler;
pub mod timing;

mod workers;

pub use api::{
    GenerationError, OfflineTrialGenerator, Rejection, Result, RuntimeError, RuntimeHandle,
    TrialGenerator, TrialRequest, parse_trial_response,
};
pub use controller::{
    AnimationView, GameSetup, GenerationRequest, Intent, Phase, SessionSnapshot, TurnController,
};
pub use events::{Event, EventBus, LogEvent, Topic, TurnEvent};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use scheduler::{Millis, RevealKind, Scheduler, Task};
pub use timing::Timings;
