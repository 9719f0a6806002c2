//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive a game.

use std::env;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use game_content::Content;
use game_core::{GameConfig, GameMode, PcgRng, RngOracle};

use crate::api::{OfflineTrialGenerator, Result, RuntimeError, RuntimeHandle, TrialGenerator};
use crate::controller::TurnController;
use crate::events::EventBus;
use crate::timing::Timings;
use crate::workers::{Command, SessionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub timings: Timings,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Fixed RNG seed for games started without one (reproducible sessions).
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            timings: Timings::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `SAGE_WIN_CONDITION`, `SAGE_MODE`, `SAGE_LOG_CAPACITY`
    /// - `SAGE_SEED`
    /// - `SAGE_EVENT_BUFFER` / `SAGE_COMMAND_BUFFER`
    ///
    /// Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Overrides fields of `self` from the same variables as [`Self::from_env`].
    pub fn with_env(mut self) -> Self {
        if let Some(win_condition) = read_env::<u32>("SAGE_WIN_CONDITION") {
            self.game_config.win_condition = win_condition.max(1);
        }
        if let Some(mode) = read_env::<GameMode>("SAGE_MODE") {
            self.game_config.mode = mode;
        }
        if let Some(capacity) = read_env::<usize>("SAGE_LOG_CAPACITY") {
            self.game_config.log_capacity = capacity.max(1);
        }
        if let Some(seed) = read_env::<u64>("SAGE_SEED") {
            self.seed = Some(seed);
        }
        if let Some(capacity) = read_env::<usize>("SAGE_EVENT_BUFFER") {
            self.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("SAGE_COMMAND_BUFFER") {
            self.command_buffer_size = capacity.max(1);
        }

        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that hosts one game session.
///
/// Design: Runtime owns the worker task.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully.
    ///
    /// The worker stops once every clone of the handle is dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    content: Option<Content>,
    oracle: Option<Arc<dyn RngOracle>>,
    generator: Option<Arc<dyn TrialGenerator>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            content: None,
            oracle: None,
            generator: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Board, decks and vignettes (defaults to the standard journey).
    pub fn content(mut self, content: Content) -> Self {
        self.content = Some(content);
        self
    }

    /// RNG oracle for every draw (defaults to [`PcgRng`]).
    pub fn oracle(mut self, oracle: impl RngOracle + 'static) -> Self {
        self.oracle = Some(Arc::new(oracle));
        self
    }

    /// Trial generator used in advanced mode (defaults to an offline one,
    /// which makes every State tile fall back to the static deck).
    pub fn generator(mut self, generator: impl TrialGenerator + 'static) -> Self {
        self.generator = Some(Arc::new(generator));
        self
    }

    /// Build the runtime and spawn its worker.
    pub async fn build(self) -> Result<Runtime> {
        let content = match self.content {
            Some(content) => content,
            None => Content::standard()?,
        };
        let oracle = self.oracle.unwrap_or_else(|| Arc::new(PcgRng));
        let generator = self
            .generator
            .unwrap_or_else(|| Arc::new(OfflineTrialGenerator));

        let generation_timeout = self.config.timings.generation_timeout;
        let controller = TurnController::new(
            self.config.game_config.clone(),
            self.config.timings.clone(),
            content,
            oracle,
        )
        .map_err(|e| RuntimeError::Content(e.to_string()))?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let worker = SessionWorker::new(
            controller,
            command_rx,
            event_bus,
            generator,
            generation_timeout,
        )
        .with_seed(self.config.seed);

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_reference_values() {
        let config = RuntimeConfig::default();
        assert_eq!(config.game_config.win_condition, 10);
        assert_eq!(config.event_buffer_size, 100);
        assert_eq!(config.command_buffer_size, 32);
        assert!(config.seed.is_none());
    }

    #[test]
    fn read_env_ignores_missing_values() {
        assert_eq!(read_env::<u32>("SAGE_TEST_SURELY_UNSET_VARIABLE"), None);
    }
}
