//! Scene event bus.
//!
//! Each published event goes two ways: synchronous handlers, called in
//! subscription order on the publishing thread, and a tokio broadcast
//! channel for async receivers. A bounded journal of recent events can be
//! enabled for inspection.

use parking_lot::{Mutex, RwLock};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{EventCategory, SceneEvent};

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0.simple())
    }
}

/// Which events a handler wants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EventFilter {
    #[default]
    All,
    /// Events whose category is in the list.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    pub fn matches(&self, event: &SceneEvent) -> bool {
        match self {
            Self::All => true,
            Self::Categories(wanted) => wanted.contains(&event.category()),
        }
    }
}

type Handler = Arc<dyn Fn(&SceneEvent) + Send + Sync>;

struct Subscription {
    id: SubscriptionId,
    filter: EventFilter,
    handler: Handler,
}

/// Event bus settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBusConfig {
    /// Capacity of the broadcast channel behind [`EventBus::receiver`].
    pub channel_capacity: usize,
    /// How many recent events the journal keeps; 0 disables it.
    pub journal_limit: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
            journal_limit: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventBusError {
    /// Neither a matching handler nor an async receiver took the event.
    #[error("No active subscribers")]
    NoSubscribers,
}

struct Shared {
    sender: broadcast::Sender<SceneEvent>,
    subscriptions: RwLock<Vec<Subscription>>,
    journal: Mutex<VecDeque<SceneEvent>>,
    config: EventBusConfig,
}

/// Scene event bus.
///
/// Clones are handles onto the same subscriptions, channel and journal.
#[derive(Clone)]
pub struct EventBus {
    shared: Arc<Shared>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    pub fn with_config(config: EventBusConfig) -> Self {
        let (sender, _) = broadcast::channel(config.channel_capacity.max(1));
        Self {
            shared: Arc::new(Shared {
                sender,
                subscriptions: RwLock::new(Vec::new()),
                journal: Mutex::new(VecDeque::with_capacity(config.journal_limit)),
                config,
            }),
        }
    }

    /// Publishes `event` to matching handlers and async receivers.
    ///
    /// Returns how many of them got it. Handlers run without any bus lock
    /// held, so they may subscribe or unsubscribe.
    pub fn publish(&self, event: SceneEvent) -> Result<usize, EventBusError> {
        tracing::trace!("Publishing {}", event.description());
        self.record(&event);

        let handlers: Vec<Handler> = self
            .shared
            .subscriptions
            .read()
            .iter()
            .filter(|s| s.filter.matches(&event))
            .map(|s| Arc::clone(&s.handler))
            .collect();
        for handler in &handlers {
            handler(&event);
        }

        let receivers = self.shared.sender.send(event).unwrap_or(0);
        match handlers.len() + receivers {
            0 => Err(EventBusError::NoSubscribers),
            delivered => Ok(delivered),
        }
    }

    /// Registers a synchronous handler for events passing `filter`.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(&SceneEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        self.shared.subscriptions.write().push(Subscription {
            id,
            filter,
            handler: Arc::new(handler),
        });
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Removes a handler. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.shared.subscriptions.write();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        let removed = subscriptions.len() != before;
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.subscriptions.read().len()
    }

    /// New async receiver; it sees events published from now on.
    pub fn receiver(&self) -> broadcast::Receiver<SceneEvent> {
        self.shared.sender.subscribe()
    }

    /// Journaled events, oldest first.
    pub fn recent_events(&self) -> Vec<SceneEvent> {
        self.shared.journal.lock().iter().cloned().collect()
    }

    /// Empties the journal and returns what it held, oldest first.
    pub fn drain_recent_events(&self) -> Vec<SceneEvent> {
        self.shared.journal.lock().drain(..).collect()
    }

    pub fn config(&self) -> &EventBusConfig {
        &self.shared.config
    }

    fn record(&self, event: &SceneEvent) {
        let limit = self.shared.config.journal_limit;
        if limit == 0 {
            return;
        }
        let mut journal = self.shared.journal.lock();
        if journal.len() == limit {
            journal.pop_front();
        }
        journal.push_back(event.clone());
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("config", &self.shared.config)
            .finish()
    }
}
