//! # BusyIndicator: the public facade.
//!
//! [`BusyIndicator`] owns the request queue, the timer scheduler, the
//! reconciler, and the event bus. It is an explicit owned instance:
//! construct one per application context (one per page) and hand clones to
//! whatever drives async work; there is no hidden global.
//!
//! ## Key responsibilities
//! - sanitize identifiers and normalize timeouts on the way in
//! - mutate the queue atomically and reconcile after every mutation
//! - schedule the keyed auto-expiry timer per request
//! - publish an [`Event`] for every observable change
//!
//! No method panics and none returns an error: every internal failure is
//! absorbed and reported on the bus. The worst observable symptom of a fault
//! is the spinner failing to show or hide, never a crash of caller code.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::events::{Bus, Event, EventKind};
use crate::requests::{sanitize_id, BusyQueue, BusyRequest, RequestSpec};

use super::builder::IndicatorBuilder;
use super::reconciler::{Reconciler, RenderState};
use super::scheduler::{Scheduler, TimerKey};

/// Coalescing busy indicator: many overlapping requests, one on-screen
/// spinner.
///
/// Cheap to clone; all clones share the same queue and surface. All methods
/// must be called from within a tokio runtime (timers are tokio tasks).
/// Dropping the last clone cancels every pending timer.
///
/// ## Example
/// ```rust
/// use busyvisor::{BusyIndicator, Config};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let busy = BusyIndicator::builder(Config::default()).build();
///
///     busy.start("sync-inbox");
///     assert!(busy.is_busy());
///
///     busy.stop("sync-inbox");
///     assert!(!busy.is_busy());
/// }
/// ```
#[derive(Clone)]
pub struct BusyIndicator {
    inner: Arc<Inner>,
}

impl BusyIndicator {
    /// Starts building an indicator with the given configuration.
    pub fn builder(cfg: Config) -> IndicatorBuilder {
        IndicatorBuilder::new(cfg)
    }

    pub(super) fn from_inner(inner: Inner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Requests the indicator with the default timeout, non-modal.
    ///
    /// `id` identifies the request to a later [`stop`](Self::stop); the
    /// empty string submits an anonymous request that only the timeout can
    /// dequeue. Single quotes are stripped from the id. Re-submitting a
    /// queued id replaces the old entry and resets its timeout.
    pub fn start(&self, id: &str) {
        self.start_with(id, RequestSpec::new());
    }

    /// Requests the indicator with the default timeout and the modal
    /// underlay raised.
    pub fn start_modal(&self, id: &str) {
        self.start_with(id, RequestSpec::new().modal());
    }

    /// Requests the indicator with explicit options.
    pub fn start_with(&self, id: &str, spec: RequestSpec) {
        let id = sanitize_id(id);
        let timeout = self.inner.cfg.effective_timeout(spec.timeout());
        let request = BusyRequest {
            id: id.clone(),
            expiry: Instant::now() + timeout,
            modal: spec.is_modal(),
        };

        let mut queue = self.inner.queue.lock();
        if let Some(old) = queue.push(request) {
            self.inner
                .bus
                .publish(Event::new(EventKind::RequestReplaced).with_id(old.id));
        }
        self.inner.bus.publish(
            Event::new(EventKind::RequestQueued)
                .with_id(id.clone())
                .with_timeout(timeout)
                .with_modal(spec.is_modal())
                .with_pending(queue.len()),
        );

        // Keyed by id: re-submission supersedes the old deadline instead of
        // letting a stale timer dequeue the fresh entry early.
        let weak = Arc::downgrade(&self.inner);
        self.inner
            .scheduler
            .schedule(TimerKey::Expiry(id), timeout, move || {
                if let Some(inner) = weak.upgrade() {
                    inner.expire();
                }
            });

        self.inner.reconcile(&queue);
    }

    /// Reports the request with this id as complete.
    ///
    /// Unknown (or already-expired) ids are a no-op; stale entries whose
    /// expiry has passed are swept regardless of the id given.
    pub fn stop(&self, id: &str) {
        let id = sanitize_id(id);
        let mut queue = self.inner.queue.lock();
        let mut touched = false;

        if queue.remove(&id).is_some() {
            self.inner.bus.publish(
                Event::new(EventKind::RequestFinished)
                    .with_id(id)
                    .with_pending(queue.len()),
            );
            touched = true;
        }
        touched |= self.inner.sweep(&mut queue);

        if touched {
            self.inner.reconcile(&queue);
        }
    }

    /// Clears the queue unconditionally and hides the indicator.
    ///
    /// Pending expiry timers are left to fire into the empty queue as
    /// no-ops. Fade timing may lag the logical state visually.
    pub fn reset(&self) {
        let mut queue = self.inner.queue.lock();
        let dropped = queue.clear();
        self.inner
            .bus
            .publish(Event::new(EventKind::QueueCleared).with_pending(dropped));
        self.inner.reconcile(&queue);
    }

    /// Read-only snapshot of the outstanding requests, in queue order.
    /// Diagnostic only.
    pub fn status(&self) -> Vec<BusyRequest> {
        self.inner.queue.lock().snapshot()
    }

    /// True while at least one request is outstanding.
    pub fn is_busy(&self) -> bool {
        !self.inner.queue.lock().is_empty()
    }

    /// Taps the raw event stream.
    ///
    /// The receiver only observes events published after this call.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.inner.bus.subscribe()
    }
}

/// Shared internals behind every [`BusyIndicator`] clone.
pub(super) struct Inner {
    pub(super) cfg: Config,
    pub(super) queue: Mutex<BusyQueue>,
    pub(super) reconciler: Arc<Reconciler>,
    pub(super) scheduler: Arc<Scheduler>,
    pub(super) bus: Bus,
    pub(super) root: CancellationToken,
}

impl Inner {
    /// Timer-driven dequeue: sweeps whatever has expired by now.
    ///
    /// Safe against any interleaving with direct `stop` calls - if the
    /// entry is already gone the sweep finds nothing and nothing changes.
    fn expire(&self) {
        let mut queue = self.queue.lock();
        if self.sweep(&mut queue) {
            self.reconcile(&queue);
        }
    }

    /// Removes stale entries, warning per victim. Returns whether the queue
    /// changed.
    fn sweep(&self, queue: &mut BusyQueue) -> bool {
        let victims = queue.sweep_expired(Instant::now());
        for victim in &victims {
            self.bus.publish(
                Event::new(EventKind::RequestExpired)
                    .with_id(victim.id.clone())
                    .with_pending(queue.len()),
            );
        }
        !victims.is_empty()
    }

    fn reconcile(&self, queue: &BusyQueue) {
        self.reconciler.apply(&RenderState::derive(queue));
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        // Detach every pending timer; their tasks hold only weak references
        // back here.
        self.root.cancel();
    }
}
