use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use busyvisor::{
    BusyIndicator, Config, Event, EventKind, Layer, MockSurface, RequestSpec, Subscribe,
};

/// Past the default 500ms fade grace.
const PAST_FADE: Duration = Duration::from_millis(600);

fn fixture() -> (Arc<MockSurface>, BusyIndicator) {
    let surface = Arc::new(MockSurface::new());
    let busy = BusyIndicator::builder(Config::default())
        .with_surface(surface.clone())
        .build();
    (surface, busy)
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(ev) = rx.try_recv() {
        events.push(ev);
    }
    events
}

#[tokio::test(start_paused = true)]
async fn spinner_tracks_queue_occupancy() {
    let (surface, busy) = fixture();
    assert!(!busy.is_busy());
    assert!(!surface.visible(Layer::Spinner));

    busy.start("load");
    assert!(busy.is_busy());
    assert!(surface.visible(Layer::Spinner));
    assert!(!surface.visible(Layer::Overlay));

    busy.stop("load");
    assert!(!busy.is_busy());
    tokio::time::sleep(PAST_FADE).await;
    assert!(!surface.visible(Layer::Spinner));
}

#[tokio::test(start_paused = true)]
async fn overlapping_requests_share_one_indicator() {
    let (surface, busy) = fixture();

    busy.start("load-users");
    busy.start_with(
        "load-posts",
        RequestSpec::new().with_timeout(Duration::from_secs(10)).modal(),
    );

    assert_eq!(busy.status().len(), 2);
    assert!(surface.visible(Layer::Spinner));
    assert!(surface.visible(Layer::Overlay));
    assert_eq!(surface.label(), "load-users");

    busy.stop("load-users");
    assert_eq!(busy.status().len(), 1);
    assert!(surface.visible(Layer::Spinner));
    assert!(surface.visible(Layer::Overlay));
    assert_eq!(surface.label(), "load-posts");

    busy.stop("load-posts");
    assert!(busy.status().is_empty());
    tokio::time::sleep(PAST_FADE).await;
    assert!(!surface.visible(Layer::Spinner));
    assert!(!surface.visible(Layer::Overlay));
}

#[tokio::test(start_paused = true)]
async fn duplicate_start_replaces_and_resets_timeout() {
    let (_surface, busy) = fixture();
    let mut rx = busy.subscribe();

    busy.start_with("x", RequestSpec::new().with_timeout(Duration::from_millis(30)));
    tokio::time::sleep(Duration::from_millis(20)).await;
    busy.start_with("x", RequestSpec::new().with_timeout(Duration::from_millis(30)));

    let replaced = drain(&mut rx)
        .iter()
        .filter(|e| e.kind == EventKind::RequestReplaced)
        .count();
    assert_eq!(replaced, 1);
    assert_eq!(busy.status().len(), 1);

    // Past the first deadline: the superseded expiry must not dequeue the
    // fresh entry.
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(busy.status().len(), 1);

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(busy.status().is_empty());
}

#[tokio::test(start_paused = true)]
async fn stop_of_unknown_id_is_noop() {
    let (surface, busy) = fixture();

    busy.start("real");
    busy.stop("imaginary");

    assert_eq!(busy.status().len(), 1);
    assert!(surface.visible(Layer::Spinner));
}

#[tokio::test(start_paused = true)]
async fn request_expires_without_stop() {
    let (surface, busy) = fixture();
    let mut rx = busy.subscribe();

    busy.start_with("a", RequestSpec::new().with_timeout(Duration::from_millis(10)));
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(busy.status().is_empty());
    let events = drain(&mut rx);
    let expired: Vec<_> = events
        .iter()
        .filter(|e| e.kind == EventKind::RequestExpired)
        .collect();
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].id.as_deref(), Some("a"));

    tokio::time::sleep(PAST_FADE).await;
    assert!(!surface.visible(Layer::Spinner));
}

#[tokio::test(start_paused = true)]
async fn reset_clears_everything_immediately() {
    let (surface, busy) = fixture();

    busy.start("a");
    busy.start_modal("m");
    busy.start_with("", RequestSpec::new().with_timeout(Duration::from_millis(50)));
    assert_eq!(busy.status().len(), 3);

    busy.reset();
    assert!(busy.status().is_empty());
    assert!(!busy.is_busy());

    tokio::time::sleep(PAST_FADE).await;
    assert!(!surface.visible(Layer::Spinner));
    assert!(!surface.visible(Layer::Overlay));

    // Stale expiry timers fire into the empty queue as no-ops.
    tokio::time::sleep(Duration::from_secs(8)).await;
    assert!(busy.status().is_empty());
}

#[tokio::test(start_paused = true)]
async fn ids_are_sanitized_on_both_paths() {
    let (_surface, busy) = fixture();

    busy.start("a'b");
    let status = busy.status();
    assert_eq!(status.len(), 1);
    assert_eq!(status[0].id, "ab");

    // The same raw string addresses the same entry on the stop path.
    busy.stop("a'b");
    assert!(busy.status().is_empty());
}

#[tokio::test(start_paused = true)]
async fn element_creation_is_idempotent_across_cycles() {
    let (surface, busy) = fixture();

    busy.start("one");
    busy.stop("one");
    tokio::time::sleep(PAST_FADE).await;
    assert!(!surface.visible(Layer::Spinner));

    busy.start("two");
    assert!(surface.visible(Layer::Spinner));
    assert_eq!(surface.creates(Layer::Spinner), 1);
}

#[tokio::test(start_paused = true)]
async fn fresh_show_cancels_pending_fade() {
    let (surface, busy) = fixture();

    busy.start("a");
    busy.stop("a");
    tokio::time::sleep(Duration::from_millis(100)).await;

    busy.start("b");
    assert_eq!(surface.opacity(Layer::Spinner), 1.0);

    tokio::time::sleep(PAST_FADE).await;
    assert!(surface.visible(Layer::Spinner));
}

#[tokio::test(start_paused = true)]
async fn anonymous_requests_are_never_deduplicated() {
    let (_surface, busy) = fixture();

    busy.start_with("", RequestSpec::new().with_timeout(Duration::from_millis(10)));
    busy.start_with("", RequestSpec::new().with_timeout(Duration::from_millis(20)));
    assert_eq!(busy.status().len(), 2);

    // stop cannot address anonymous entries...
    busy.stop("");
    assert_eq!(busy.status().len(), 2);

    // ...only the expiry sweep removes them.
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(busy.status().is_empty());
}

#[tokio::test(start_paused = true)]
async fn overlay_follows_modal_entries_only() {
    let (surface, busy) = fixture();

    busy.start("plain");
    assert!(!surface.visible(Layer::Overlay));

    busy.start_modal("heavy");
    assert!(surface.visible(Layer::Overlay));

    // The modal entry is still queued: the overlay must survive.
    busy.stop("plain");
    assert!(surface.visible(Layer::Overlay));
    assert_eq!(surface.label(), "heavy");

    busy.stop("heavy");
    tokio::time::sleep(PAST_FADE).await;
    assert!(!surface.visible(Layer::Overlay));
    assert!(!surface.visible(Layer::Spinner));
}

#[tokio::test(start_paused = true)]
async fn surface_failure_degrades_without_panicking() {
    let (surface, busy) = fixture();
    let mut rx = busy.subscribe();
    surface.set_failing(true);

    busy.start("a");

    // Queue logic is unaffected by the dead surface.
    assert_eq!(busy.status().len(), 1);
    assert!(drain(&mut rx)
        .iter()
        .any(|e| e.kind == EventKind::SurfaceDegraded));

    // Surface recovers; the next mutation retries creation lazily.
    surface.set_failing(false);
    busy.start("b");
    assert!(surface.visible(Layer::Spinner));
}

struct Collector {
    seen: Mutex<Vec<EventKind>>,
}

#[async_trait]
impl Subscribe for Collector {
    async fn on_event(&self, event: &Event) {
        self.seen.lock().push(event.kind);
    }

    fn name(&self) -> &'static str {
        "collector"
    }
}

#[tokio::test(start_paused = true)]
async fn subscribers_observe_the_lifecycle() {
    let collector = Arc::new(Collector {
        seen: Mutex::new(Vec::new()),
    });
    let subs: Vec<Arc<dyn Subscribe>> = vec![collector.clone()];
    let busy = BusyIndicator::builder(Config::default())
        .with_surface(Arc::new(MockSurface::new()))
        .with_subscribers(subs)
        .build();

    busy.start("job");
    busy.stop("job");

    // Let the fan-out listener and the subscriber worker drain.
    tokio::time::sleep(Duration::from_millis(10)).await;

    let seen = collector.seen.lock().clone();
    assert!(seen.contains(&EventKind::RequestQueued));
    assert!(seen.contains(&EventKind::LayerShown));
    assert!(seen.contains(&EventKind::RequestFinished));
    assert!(seen.contains(&EventKind::LayerFading));
}
