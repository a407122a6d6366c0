//! Construction and wiring of a [`BusyIndicator`].

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::events::Bus;
use crate::requests::BusyQueue;
use crate::subscribers::{Subscribe, SubscriberSet};
use crate::surface::{NullSurface, Surface};

use super::indicator::{BusyIndicator, Inner};
use super::reconciler::Reconciler;
use super::scheduler::Scheduler;

/// Builder for constructing a [`BusyIndicator`].
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use busyvisor::{BusyIndicator, Config, MockSurface};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let busy = BusyIndicator::builder(Config::default())
///         .with_surface(Arc::new(MockSurface::new()))
///         .build();
///     busy.start("warm-cache");
/// }
/// ```
pub struct IndicatorBuilder {
    cfg: Config,
    surface: Option<Arc<dyn Surface>>,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl IndicatorBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            surface: None,
            subscribers: Vec::new(),
        }
    }

    /// Sets the rendering surface adapter.
    ///
    /// Defaults to [`NullSurface`] (queue, timeouts, and events run
    /// normally; nothing is drawn).
    pub fn with_surface(mut self, surface: Arc<dyn Surface>) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive indicator events through dedicated workers with
    /// bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the indicator and wires the subscriber listener.
    ///
    /// Must be called inside a tokio runtime when subscribers are present
    /// (their workers and the fan-out listener are spawned here).
    pub fn build(self) -> BusyIndicator {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let root = CancellationToken::new();

        if !self.subscribers.is_empty() {
            Self::spawn_listener(&bus, root.child_token(), SubscriberSet::new(self.subscribers));
        }

        let scheduler = Scheduler::new(root.child_token());
        let surface = self
            .surface
            .unwrap_or_else(|| Arc::new(NullSurface::new()) as Arc<dyn Surface>);
        let reconciler = Reconciler::new(
            surface,
            Arc::clone(&scheduler),
            bus.clone(),
            self.cfg.fade_grace,
        );

        BusyIndicator::from_inner(Inner {
            cfg: self.cfg,
            queue: Mutex::new(BusyQueue::new()),
            reconciler,
            scheduler,
            bus,
            root,
        })
    }

    /// Subscribes to the bus and forwards events to the subscriber set
    /// until the indicator is dropped or the bus closes.
    fn spawn_listener(bus: &Bus, stop: CancellationToken, subs: SubscriberSet) {
        let mut rx = bus.subscribe();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = stop.cancelled() => break,
                    msg = rx.recv() => match msg {
                        Ok(ev) => subs.emit(&ev),
                        Err(broadcast::error::RecvError::Closed) => break,
                        Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    }
                }
            }
            subs.shutdown().await;
        });
    }
}
