//! # Events emitted by the indicator.
//!
//! [`EventKind`] classifies events across three categories:
//! - **Queue events**: request lifecycle (queued, replaced, finished,
//!   expired, cleared)
//! - **Layer events**: visibility transitions applied to the surface
//! - **Degradation events**: surface calls that were absorbed as no-ops
//!
//! The [`Event`] struct carries the metadata each kind sets: timestamps,
//! request id, affected layer, queue depth, and so on.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use busyvisor::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::RequestQueued)
//!     .with_id("load-users")
//!     .with_timeout(Duration::from_secs(7))
//!     .with_pending(1);
//!
//! assert_eq!(ev.kind, EventKind::RequestQueued);
//! assert_eq!(ev.id.as_deref(), Some("load-users"));
//! assert_eq!(ev.pending, Some(1));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::surface::Layer;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of indicator events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Queue events ===
    /// A request was accepted into the queue.
    ///
    /// Sets: `id`, `timeout_ms`, `modal`, `pending`, `at`, `seq`.
    RequestQueued,

    /// A queued request with the same id was replaced by a fresh submission.
    ///
    /// Sets: `id`, `at`, `seq`.
    RequestReplaced,

    /// A request was explicitly stopped before its timeout.
    ///
    /// Sets: `id`, `pending`, `at`, `seq`.
    RequestFinished,

    /// A request hit its timeout and was auto-dequeued. Warning: names the
    /// caller that never reported completion.
    ///
    /// Sets: `id`, `pending`, `at`, `seq`.
    RequestExpired,

    /// The queue was cleared unconditionally by `reset`.
    ///
    /// Sets: `pending` (number of entries discarded), `at`, `seq`.
    QueueCleared,

    // === Layer events ===
    /// A layer went from hidden (or fading) to shown.
    ///
    /// Sets: `layer`, `at`, `seq`.
    LayerShown,

    /// A layer began its fade-out; it fully hides after the grace delay
    /// unless a fresh show supersedes the fade.
    ///
    /// Sets: `layer`, `at`, `seq`.
    LayerFading,

    /// A layer completed its fade-out and is fully hidden.
    ///
    /// Sets: `layer`, `at`, `seq`.
    LayerHidden,

    // === Degradation events ===
    /// A surface call failed and was absorbed as a no-op. Warning.
    ///
    /// Sets: `layer` (when the failure is layer-scoped), `reason`, `at`, `seq`.
    SurfaceDegraded,
}

/// Indicator event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Request id, if applicable (may be the empty anonymous id).
    pub id: Option<Arc<str>>,
    /// Affected layer, for layer-scoped events.
    pub layer: Option<Layer>,
    /// Queue depth after the mutation (for `QueueCleared`: entries dropped).
    pub pending: Option<usize>,
    /// Request timeout in milliseconds (compact).
    pub timeout_ms: Option<u32>,
    /// Whether the request demanded the modal underlay.
    pub modal: Option<bool>,
    /// Human-readable reason (surface errors, diagnostics).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            id: None,
            layer: None,
            pending: None,
            timeout_ms: None,
            modal: None,
            reason: None,
        }
    }

    /// Attaches a request id.
    #[inline]
    pub fn with_id(mut self, id: impl Into<Arc<str>>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attaches the affected layer.
    #[inline]
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = Some(layer);
        self
    }

    /// Attaches the queue depth after the mutation.
    #[inline]
    pub fn with_pending(mut self, pending: usize) -> Self {
        self.pending = Some(pending);
        self
    }

    /// Attaches a timeout duration (stored as milliseconds).
    #[inline]
    pub fn with_timeout(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.timeout_ms = Some(ms);
        self
    }

    /// Attaches the modal flag.
    #[inline]
    pub fn with_modal(mut self, modal: bool) -> Self {
        self.modal = Some(modal);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// True for events that indicate something went wrong (a caller timed
    /// out, or the surface degraded).
    #[inline]
    pub fn is_warning(&self) -> bool {
        matches!(
            self.kind,
            EventKind::RequestExpired | EventKind::SurfaceDegraded
        )
    }
}
