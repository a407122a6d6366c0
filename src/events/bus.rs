//! # Event bus for broadcasting indicator events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] providing
//! non-blocking publishing from the indicator and the reconciler.
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks or fails.
//! - **Bounded capacity**: a single ring buffer stores recent events for all
//!   receivers; slow receivers observe `RecvError::Lagged(n)` and skip the
//!   `n` oldest items.
//! - **No persistence**: events are dropped if no receiver is subscribed at
//!   send time.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for indicator events.
///
/// Cheap to clone (internally holds an `Arc`-backed sender); multiple
/// publishers can publish concurrently and every subscriber receives a clone
/// of each event.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (clamped to 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all active subscribers.
    ///
    /// If there are no receivers the event is dropped; the call still
    /// returns immediately.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver that observes subsequent events.
    ///
    /// Each call creates an independent receiver; it only gets events sent
    /// **after** it subscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}
