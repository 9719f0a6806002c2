//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! starting a game, sending player intents or streaming events from specific
//! topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use super::errors::{Result, RuntimeError};
use crate::controller::{GameSetup, Intent, SessionSnapshot};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Start a game with the given roster. Fails while a game is in progress.
    pub async fn start_game(&self, setup: GameSetup) -> Result<()> {
        self.request(|reply| Command::StartGame { setup, reply }).await?
    }

    /// Send a player intent for the current turn.
    pub async fn send_intent(&self, intent: Intent) -> Result<()> {
        self.request(|reply| Command::Intent { intent, reply }).await?
    }

    pub async fn roll(&self) -> Result<()> {
        self.send_intent(Intent::Roll).await
    }

    pub async fn select_option(&self, choice: usize) -> Result<()> {
        self.send_intent(Intent::SelectOption(choice)).await
    }

    pub async fn acknowledge_modal(&self) -> Result<()> {
        self.send_intent(Intent::AcknowledgeModal).await
    }

    pub async fn acknowledge_pause(&self) -> Result<()> {
        self.send_intent(Intent::AcknowledgePause).await
    }

    /// Cancel everything and return to the not-started state.
    pub async fn restart(&self) -> Result<()> {
        self.request(|reply| Command::Restart { reply }).await
    }

    /// Query the current session snapshot
    pub async fn query_snapshot(&self) -> Result<SessionSnapshot> {
        self.request(|reply| Command::QuerySnapshot { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Session` - Full snapshot after every transition
    /// - `Topic::Turn` - Turn starts, pauses and recoveries
    /// - `Topic::Log` - Narrative messages
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut log_rx = handle.subscribe(Topic::Log);
    /// while let Ok(event) = log_rx.recv().await {
    ///     // Print narrative lines
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
