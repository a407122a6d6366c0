//! # Example: custom_subscriber
//!
//! Demonstrates how to build and attach a custom event subscriber.
//!
//! Shows how to:
//! - Implement the [`Subscribe`] trait.
//! - Inspect [`Event`] / [`EventKind`] for request lifecycle metrics.
//! - Wire the subscriber into [`IndicatorBuilder::with_subscribers`].
//!
//! ## Flow
//! ```text
//! start(id) ──► BusyIndicator
//!     ├─► Bus.publish(RequestQueued)
//!     ├─► Reconciler ──► publish(LayerShown / LayerFading / LayerHidden)
//!     └─► builder listener
//!           └─► SubscriberSet.emit() ──► ConsoleSubscriber.on_event()
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example custom_subscriber
//! ```

use std::{sync::Arc, time::Duration};

use busyvisor::{BusyIndicator, Config, Event, EventKind, RequestSpec, Subscribe};

/// A simple console subscriber that prints selected events.
/// In real life, you could export metrics, ship logs, or trigger alerts.
struct ConsoleSubscriber;

#[async_trait::async_trait]
impl Subscribe for ConsoleSubscriber {
    async fn on_event(&self, ev: &Event) {
        match ev.kind {
            // === Request lifecycle ===
            EventKind::RequestQueued => {
                println!(
                    "[sub] queued:   id={:?} timeout={}ms modal={} pending={}",
                    ev.id.as_deref().unwrap_or(""),
                    ev.timeout_ms.unwrap_or(0),
                    ev.modal.unwrap_or(false),
                    ev.pending.unwrap_or(0)
                );
            }
            EventKind::RequestReplaced => {
                println!("[sub] replaced: id={:?}", ev.id.as_deref().unwrap_or(""));
            }
            EventKind::RequestFinished => {
                println!(
                    "[sub] finished: id={:?} pending={}",
                    ev.id.as_deref().unwrap_or(""),
                    ev.pending.unwrap_or(0)
                );
            }
            EventKind::RequestExpired => {
                println!(
                    "[sub] expired:  id={:?} (caller never stopped it)",
                    ev.id.as_deref().unwrap_or("")
                );
            }
            EventKind::QueueCleared => {
                println!("[sub] cleared:  dropped={}", ev.pending.unwrap_or(0));
            }

            // === Layer transitions ===
            EventKind::LayerShown => {
                println!(
                    "[sub] shown:    layer={}",
                    ev.layer.map(|l| l.as_str()).unwrap_or("?")
                );
            }
            EventKind::LayerHidden => {
                println!(
                    "[sub] hidden:   layer={}",
                    ev.layer.map(|l| l.as_str()).unwrap_or("?")
                );
            }

            // === Ignored ===
            EventKind::LayerFading | EventKind::SurfaceDegraded => {}
        }
    }

    fn name(&self) -> &'static str {
        "console"
    }

    fn queue_capacity(&self) -> usize {
        1024
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cfg = Config::default();
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(ConsoleSubscriber)];
    let busy = BusyIndicator::builder(cfg).with_subscribers(subs).build();

    // A request that is replaced, one that completes, one that expires.
    busy.start("warm-cache");
    busy.start("warm-cache");
    busy.start_modal("sync");
    busy.start_with(
        "orphan",
        RequestSpec::new().with_timeout(Duration::from_millis(400)),
    );

    tokio::time::sleep(Duration::from_millis(200)).await;
    busy.stop("warm-cache");
    busy.stop("sync");

    // Wait out the orphan's timeout and the fade grace.
    tokio::time::sleep(Duration::from_millis(1200)).await;

    println!("\nfinished, pending={}", busy.status().len());
}
