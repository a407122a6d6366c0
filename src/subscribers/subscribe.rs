//! # Event subscriber trait.
//!
//! [`Subscribe`] is the extension point for observing the indicator's event
//! stream. Each subscriber gets a dedicated worker task and a per-subscriber
//! bounded queue, so a slow observer only affects itself.
//!
//! ## Rules
//! - Events are processed sequentially (FIFO) per subscriber.
//! - Queue overflow drops the event **for this subscriber only**; other
//!   subscribers are unaffected.
//! - Panics inside a subscriber are caught and reported to stderr.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use busyvisor::{Event, EventKind, Subscribe};
//!
//! struct ExpiryCounter;
//!
//! #[async_trait]
//! impl Subscribe for ExpiryCounter {
//!     async fn on_event(&self, ev: &Event) {
//!         if matches!(ev.kind, EventKind::RequestExpired) {
//!             // increment a metric, ping an alert channel, ...
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "expiry-counter" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Event subscriber for indicator observability.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called from a dedicated worker task, not in the publisher context.
    /// Events arrive in FIFO order per subscriber.
    async fn on_event(&self, event: &Event);

    /// Returns the subscriber name used in overflow/panic reports.
    ///
    /// Prefer short, descriptive names. The default uses
    /// `type_name::<Self>()`, which can be verbose - override it when
    /// possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the preferred queue capacity for this subscriber.
    ///
    /// The runtime clamps capacity to a minimum of 1. Default: 256 - the
    /// indicator is a low-traffic publisher.
    fn queue_capacity(&self) -> usize {
        256
    }
}
