//! # Broadcast Event Bus
//!
//! Fans committed contract events out to every subscriber.
//!
//! Uses `tokio::sync::broadcast` for multi-producer, multi-consumer semantics.
//! Sending never blocks; a subscriber that falls more than `capacity` events
//! behind observes `RecvError::Lagged`.

use crate::events::{ContractEvent, EventName};
use crate::ports::outbound::EventEmitter;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Default number of events buffered per subscriber.
pub const DEFAULT_EVENT_CAPACITY: usize = 1024;

/// In-memory event bus.
pub struct BroadcastEventBus {
    sender: broadcast::Sender<ContractEvent>,
    events_emitted: AtomicU64,
    capacity: usize,
}

impl BroadcastEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Create a bus buffering up to `capacity` events per subscriber.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            events_emitted: AtomicU64::new(0),
            capacity: capacity.max(1),
        }
    }

    /// Receive every event emitted after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ContractEvent> {
        self.sender.subscribe()
    }

    /// Receive only events with the given names.
    #[must_use]
    pub fn subscribe_to(&self, names: &[EventName]) -> EventSubscription {
        EventSubscription {
            receiver: self.sender.subscribe(),
            names: names.to_vec(),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for BroadcastEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventEmitter for BroadcastEventBus {
    fn emit(&self, event: &ContractEvent) -> usize {
        self.events_emitted.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(event.clone()) {
            Ok(receivers) => {
                debug!(event = %event.name, tx_id = %event.tx_id, receivers, "Event emitted");
                receivers
            }
            Err(_) => {
                warn!(event = %event.name, tx_id = %event.tx_id, "Event dropped (no subscribers)");
                0
            }
        }
    }

    fn events_emitted(&self) -> u64 {
        self.events_emitted.load(Ordering::Relaxed)
    }
}

/// Subscription filtered by event name.
pub struct EventSubscription {
    receiver: broadcast::Receiver<ContractEvent>,
    names: Vec<EventName>,
}

impl EventSubscription {
    fn matches(&self, event: &ContractEvent) -> bool {
        self.names.is_empty() || self.names.contains(&event.name)
    }

    /// Wait for the next matching event. `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<ContractEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.matches(&event) => return Some(event),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Subscriber lagged, events skipped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next matching event already buffered, without waiting.
    pub fn try_recv(&mut self) -> Option<ContractEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.matches(&event) => return Some(event),
                Ok(_) => {}
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Subscriber lagged, events skipped");
                }
                Err(_) => return None,
            }
        }
    }
}
