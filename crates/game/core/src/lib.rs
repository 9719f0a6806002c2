//! Deterministic board-game rules shared by the runtime and offline tools.
//!
//! `game-core` defines the canonical data model (players, board, encounter
//! cards, session state) and the pure transforms that mutate it. Nothing in
//! this crate sleeps, spawns or performs I/O: pacing and scheduling live in the
//! runtime, which drives every rule change through [`engine::GameEngine`].
pub mod board;
pub mod cards;
pub mod config;
pub mod engine;
pub mod error;
pub mod rng;
pub mod state;

pub use board::{Board, Tile, TileKind};
pub use cards::{
    AiDecision, CardEffect, ChanceCard, ChanceEffect, EventCard, EventEffect, FateCard,
    Placement, TRIAL_OPTIONS, TrialCard,
};
pub use config::{GameConfig, GameMode};
pub use engine::{
    EffectOutcome, GameEngine, MeatChange, PauseAck, Route, Step, TurnStart, VictoryCheck,
    check_victory, plan_route,
};
pub use error::{EngineError, SetupError};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use state::{
    GameState, Modal, ModalKind, NarrativeLog, Player, PlayerId, PlayerSetup,
};
