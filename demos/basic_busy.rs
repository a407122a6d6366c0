//! # Example: basic_busy
//!
//! Minimal example of coalescing two overlapping requests into one
//! indicator, with the built-in [`LogWriter`] printing each event.
//!
//! Demonstrates how to:
//! - Build a [`BusyIndicator`] with default [`Config`].
//! - Overlap a plain request and a modal one.
//! - Let a request expire instead of stopping it.
//!
//! ## Flow
//! ```text
//! start("fetch") ──► queue [fetch] ──► spinner shown
//! start_modal("save") ──► queue [fetch, save] ──► overlay shown
//! stop("fetch") ──► queue [save] ──► both layers stay up
//! (no stop for "save") ──► expiry timer fires ──► [expired] warning
//!                     ──► queue [] ──► fade, then hidden
//! ```
//!
//! ## Run
//! Requires the `logging` feature to export [`LogWriter`].
//! ```bash
//! cargo run --example basic_busy --features logging
//! ```

use std::{sync::Arc, time::Duration};

use busyvisor::{BusyIndicator, Config, LogWriter, RequestSpec, Subscribe};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // 1. Default configuration: 7s timeout, 500ms fade grace
    let cfg = Config::default();

    // 2. The built-in printer as the only subscriber
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];

    // 3. Build the indicator (NullSurface by default: nothing is drawn,
    //    the queue and event machinery still run)
    let busy = BusyIndicator::builder(cfg).with_subscribers(subs).build();

    // 4. Two overlapping operations, one indicator
    busy.start("fetch");
    busy.start_with(
        "save",
        RequestSpec::new()
            .with_timeout(Duration::from_millis(800))
            .modal(),
    );
    println!("pending: {}", busy.status().len());

    // 5. The first caller reports completion...
    tokio::time::sleep(Duration::from_millis(300)).await;
    busy.stop("fetch");

    // 6. ...the second never does: its timeout dequeues it
    tokio::time::sleep(Duration::from_secs(2)).await;
    println!("pending: {}", busy.status().len());
}
