//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{LogEvent, TurnEvent};
use crate::controller::SessionSnapshot;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Full session snapshots, one per handled command or fired task
    Session,
    /// Turn starts (ready, paused, recovering)
    Turn,
    /// Narrative log lines
    Log,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Session, Topic::Turn, Topic::Log];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Session(Box<SessionSnapshot>),
    Turn(TurnEvent),
    Log(LogEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Session(_) => Topic::Session,
            Event::Turn(_) => Topic::Turn,
            Event::Log(_) => Topic::Log,
        }
    }
}

struct Channels {
    session: broadcast::Sender<Event>,
    turn: broadcast::Sender<Event>,
    log: broadcast::Sender<Event>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Session => &self.session,
            Topic::Turn => &self.turn,
            Topic::Log => &self.log,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                session: broadcast::channel(capacity).0,
                turn: broadcast::channel(capacity).0,
                log: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.get(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.get(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn routes_by_topic() {
        let bus = EventBus::with_capacity(4);
        let mut log_rx = bus.subscribe(Topic::Log);
        let mut turn_rx = bus.subscribe(Topic::Turn);

        bus.publish(Event::Log(LogEvent {
            message: "hello".into(),
        }));

        match log_rx.recv().await.unwrap() {
            Event::Log(event) => assert_eq!(event.message, "hello"),
            other => panic!("unexpected event {other:?}"),
        }
        assert!(turn_rx.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(Event::Log(LogEvent {
            message: "nobody listens".into(),
        }));
        assert_eq!(bus.subscribe_multiple(&Topic::ALL).len(), 3);
    }
}
