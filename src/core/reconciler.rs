//! # Visibility reconciler.
//!
//! Derives the desired on-screen state from the queue and applies only the
//! deltas to the [`Surface`]. Each layer runs an independent three-phase
//! state machine:
//!
//! ```text
//!            show                    show (re-entry: restack + relabel only)
//!   Hidden ───────► Showing ◄──────────────────────────┐
//!     ▲                │ hide                          │
//!     │                ▼                               │
//!     │             Fading  (opacity 0, fade:<layer> pending)
//!     │                │                               │
//!     │   grace fired  │           show (cancels the pending hide)
//!     └────────────────┘──────────────────────────────►┘
//! ```
//!
//! ## Rules
//! - Backing elements are created lazily and exactly once; a hidden layer
//!   keeps its element for the next show.
//! - Every show restacks against the surface's current maximum stacking
//!   order: overlay one above it, spinner one above the overlay. The overlay
//!   is driven first so the spinner always ends up topmost.
//! - Surface failures are absorbed: published as
//!   [`EventKind::SurfaceDegraded`] and skipped. A failed creation leaves
//!   the layer `Hidden`, so the next mutation retries lazily.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;

use crate::error::SurfaceError;
use crate::events::{Bus, Event, EventKind};
use crate::requests::BusyQueue;
use crate::surface::{Layer, Surface};

use super::scheduler::{Scheduler, TimerKey};

/// Spinner opacity when shown.
const SPINNER_OPACITY: f64 = 1.0;
/// Modal underlay opacity when shown (translucent, dims the page).
const OVERLAY_OPACITY: f64 = 0.4;

/// Desired on-screen state, recomputed from the queue on every mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RenderState {
    pub spinner: bool,
    pub overlay: bool,
    pub label: String,
}

impl RenderState {
    /// Derives the target state: spinner iff any request is outstanding,
    /// overlay iff any outstanding request is modal, label from the oldest
    /// entry (best-effort UX, not a priority guarantee).
    pub(crate) fn derive(queue: &BusyQueue) -> Self {
        Self {
            spinner: !queue.is_empty(),
            overlay: queue.has_modal(),
            label: queue.first().map(|r| r.id.clone()).unwrap_or_default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LayerPhase {
    Hidden,
    Showing,
    Fading,
}

#[derive(Clone, Copy, Debug)]
struct Phases {
    spinner: LayerPhase,
    overlay: LayerPhase,
}

impl Phases {
    fn get(&self, layer: Layer) -> LayerPhase {
        match layer {
            Layer::Spinner => self.spinner,
            Layer::Overlay => self.overlay,
        }
    }

    fn set(&mut self, layer: Layer, phase: LayerPhase) {
        match layer {
            Layer::Spinner => self.spinner = phase,
            Layer::Overlay => self.overlay = phase,
        }
    }
}

/// Applies [`RenderState`] deltas to the surface.
pub(crate) struct Reconciler {
    me: Weak<Reconciler>,
    surface: Arc<dyn Surface>,
    scheduler: Arc<Scheduler>,
    bus: Bus,
    fade_grace: Duration,
    phases: Mutex<Phases>,
}

impl Reconciler {
    pub(crate) fn new(
        surface: Arc<dyn Surface>,
        scheduler: Arc<Scheduler>,
        bus: Bus,
        fade_grace: Duration,
    ) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            surface,
            scheduler,
            bus,
            fade_grace,
            phases: Mutex::new(Phases {
                spinner: LayerPhase::Hidden,
                overlay: LayerPhase::Hidden,
            }),
        })
    }

    /// Applies the target state, driving each layer's state machine.
    ///
    /// Overlay first: the spinner restacks afterwards and stays topmost.
    pub(crate) fn apply(&self, target: &RenderState) {
        let mut phases = self.phases.lock();
        self.drive(&mut phases, Layer::Overlay, target.overlay, None);
        self.drive(&mut phases, Layer::Spinner, target.spinner, Some(&target.label));
    }

    fn drive(&self, phases: &mut Phases, layer: Layer, want_visible: bool, label: Option<&str>) {
        match (phases.get(layer), want_visible) {
            (LayerPhase::Showing, true) => {
                // Re-entry: update in place, no transition replay.
                self.restack(layer);
                if let Some(label) = label {
                    self.absorb(layer, self.surface.set_label(label));
                }
            }
            (LayerPhase::Hidden, true) | (LayerPhase::Fading, true) => {
                self.scheduler.cancel(&TimerKey::Fade(layer));
                if !self.ensure_created(layer) {
                    phases.set(layer, LayerPhase::Hidden);
                    return;
                }
                self.restack(layer);
                if let Some(label) = label {
                    self.absorb(layer, self.surface.set_label(label));
                }
                self.absorb(layer, self.surface.set_opacity(layer, full_opacity(layer)));
                self.absorb(layer, self.surface.set_visible(layer, true));
                phases.set(layer, LayerPhase::Showing);
                self.bus.publish(Event::new(EventKind::LayerShown).with_layer(layer));
            }
            (LayerPhase::Showing, false) => {
                self.absorb(layer, self.surface.set_opacity(layer, 0.0));
                phases.set(layer, LayerPhase::Fading);
                self.bus.publish(Event::new(EventKind::LayerFading).with_layer(layer));

                let me = self.me.clone();
                self.scheduler
                    .schedule(TimerKey::Fade(layer), self.fade_grace, move || {
                        if let Some(rec) = me.upgrade() {
                            rec.finish_fade(layer);
                        }
                    });
            }
            (LayerPhase::Hidden, false) | (LayerPhase::Fading, false) => {}
        }
    }

    /// Completes a fade-out: fully hides the layer unless a fresh show
    /// superseded the fade in the meantime.
    fn finish_fade(&self, layer: Layer) {
        let mut phases = self.phases.lock();
        if phases.get(layer) != LayerPhase::Fading {
            return;
        }
        self.absorb(layer, self.surface.set_visible(layer, false));
        phases.set(layer, LayerPhase::Hidden);
        self.bus.publish(Event::new(EventKind::LayerHidden).with_layer(layer));
    }

    /// Lazily creates the layer's element. Returns whether it is usable.
    fn ensure_created(&self, layer: Layer) -> bool {
        if self.surface.exists(layer) {
            return true;
        }
        match self.surface.create(layer) {
            Ok(()) => true,
            Err(err) => {
                self.degraded(layer, &err);
                false
            }
        }
    }

    /// Restacks the layer above everything currently on the surface, the
    /// spinner one step above its own underlay.
    fn restack(&self, layer: Layer) {
        let top = self.surface.max_stacking_order();
        let order = match layer {
            Layer::Overlay => top + 1,
            Layer::Spinner => top + 2,
        };
        self.absorb(layer, self.surface.set_stacking(layer, order));
    }

    /// Absorbs a surface failure: publish and carry on.
    fn absorb(&self, layer: Layer, result: Result<(), SurfaceError>) {
        if let Err(err) = result {
            self.degraded(layer, &err);
        }
    }

    fn degraded(&self, layer: Layer, err: &SurfaceError) {
        self.bus.publish(
            Event::new(EventKind::SurfaceDegraded)
                .with_layer(layer)
                .with_reason(err.as_message()),
        );
    }
}

fn full_opacity(layer: Layer) -> f64 {
    match layer {
        Layer::Spinner => SPINNER_OPACITY,
        Layer::Overlay => OVERLAY_OPACITY,
    }
}

#[cfg(test)]
mod tests {
    use tokio_util::sync::CancellationToken;

    use crate::surface::MockSurface;

    use super::*;

    fn target(spinner: bool, overlay: bool, label: &str) -> RenderState {
        RenderState {
            spinner,
            overlay,
            label: label.to_string(),
        }
    }

    fn fixture() -> (Arc<MockSurface>, Arc<Reconciler>, Bus) {
        let surface = Arc::new(MockSurface::new());
        let bus = Bus::new(64);
        let scheduler = Scheduler::new(CancellationToken::new());
        let rec = Reconciler::new(
            surface.clone(),
            scheduler,
            bus.clone(),
            Duration::from_millis(500),
        );
        (surface, rec, bus)
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_creates_lazily_and_once() {
        let (surface, rec, _bus) = fixture();

        rec.apply(&target(true, false, "a"));
        assert!(surface.visible(Layer::Spinner));
        assert!(!surface.exists(Layer::Overlay));
        assert_eq!(surface.creates(Layer::Spinner), 1);
        assert_eq!(surface.label(), "a");

        // Re-entry keeps the element, updates the label in place.
        rec.apply(&target(true, false, "b"));
        assert_eq!(surface.creates(Layer::Spinner), 1);
        assert_eq!(surface.label(), "b");
    }

    #[tokio::test(start_paused = true)]
    async fn test_hide_fades_then_fully_hides() {
        let (surface, rec, _bus) = fixture();

        rec.apply(&target(true, false, "a"));
        rec.apply(&target(false, false, ""));

        // Fade begun: transparent but not yet hidden.
        assert_eq!(surface.opacity(Layer::Spinner), 0.0);
        assert!(surface.visible(Layer::Spinner));

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(!surface.visible(Layer::Spinner));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_show_cancels_pending_hide() {
        let (surface, rec, _bus) = fixture();

        rec.apply(&target(true, false, "a"));
        rec.apply(&target(false, false, ""));
        tokio::time::sleep(Duration::from_millis(100)).await;

        rec.apply(&target(true, false, "b"));
        assert_eq!(surface.opacity(Layer::Spinner), 1.0);

        // Past the original grace deadline: the cancelled hide must not land.
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(surface.visible(Layer::Spinner));
        assert_eq!(surface.creates(Layer::Spinner), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spinner_stacks_above_overlay() {
        let (surface, rec, _bus) = fixture();
        surface.set_stacking_floor(7);

        rec.apply(&target(true, true, "m"));
        assert_eq!(surface.stacking(Layer::Overlay), 8);
        assert_eq!(surface.stacking(Layer::Spinner), 9);
        assert_eq!(surface.opacity(Layer::Overlay), 0.4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_creation_failure_degrades_and_retries() {
        let (surface, rec, bus) = fixture();
        let mut rx = bus.subscribe();
        surface.set_failing(true);

        rec.apply(&target(true, false, "a"));
        assert!(!surface.exists(Layer::Spinner));
        let ev = rx.try_recv().expect("degraded event");
        assert_eq!(ev.kind, EventKind::SurfaceDegraded);

        // Surface recovers: the next apply creates lazily.
        surface.set_failing(false);
        rec.apply(&target(true, false, "a"));
        assert!(surface.visible(Layer::Spinner));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlay_hides_independently_of_spinner() {
        let (surface, rec, _bus) = fixture();

        rec.apply(&target(true, true, "m"));
        rec.apply(&target(true, false, "m"));

        assert_eq!(surface.opacity(Layer::Overlay), 0.0);
        assert_eq!(surface.opacity(Layer::Spinner), 1.0);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(!surface.visible(Layer::Overlay));
        assert!(surface.visible(Layer::Spinner));
    }
}
