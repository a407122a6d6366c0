//! # busyvisor
//!
//! **Busyvisor** is a small runtime for browser-style "busy" loading
//! indicators. Any number of overlapping asynchronous operations can request
//! the indicator independently; busyvisor coalesces them into a single
//! on-screen spinner (plus an optional modal underlay) and guarantees that a
//! caller which never reports completion cannot pin the indicator visible
//! forever - every request carries a timeout and is dequeued automatically
//! when it expires.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   start(id, spec)      stop(id)        reset()
//!        │                  │               │
//!        ▼                  ▼               ▼
//! ┌────────────────────────────────────────────────────────────────────┐
//! │  BusyIndicator (owned facade, one per application context)         │
//! │  - BusyQueue   (ordered requests: id / expiry / modal)             │
//! │  - Scheduler   (cancellable timers keyed expiry:<id>, fade:<layer>)│
//! │  - Reconciler  (per-layer Hidden/Showing/Fading state machine)     │
//! │  - Bus         (broadcast events)                                  │
//! └──────┬──────────────────────────────┬──────────────────────────────┘
//!        │ deltas only                  │ events
//!        ▼                              ▼
//! ┌──────────────────┐        ┌──────────────────────┐
//! │  Surface adapter │        │  SubscriberSet       │
//! │  (spinner layer, │        │  (per-sub queues +   │
//! │   overlay layer) │        │   worker tasks)      │
//! └──────────────────┘        └──────────────────────┘
//! ```
//!
//! ### Request lifecycle
//! ```text
//! start(id) ──► sanitize id, normalize timeout
//!           ──► queue.push (same id replaces, fresh expiry)
//!           ──► schedule expiry:<id>   (supersedes a pending one)
//!           ──► reconcile
//!
//! stop(id)  ──► queue.remove(id)      (unknown id: no-op)
//!           ──► sweep entries with expiry <= now  (warn per victim)
//!           ──► reconcile
//!
//! expiry:<id> fires ──► sweep + reconcile   (no-op if already stopped)
//!
//! reconcile ──► spinner visible iff queue non-empty
//!           ──► overlay visible iff any queued request is modal
//!           ──► hide = fade to 0, fully hidden after the grace delay
//!               (a fresh show cancels the pending hide)
//! ```
//!
//! ## Rendering
//! The core never touches a real screen. It drives the [`Surface`] capability
//! trait: element existence probe, idempotent creation, visibility, opacity,
//! stacking order, label. Adapters attach both layers to the **top-level**
//! document of their host so one indicator covers the whole page, embedded
//! frames included. [`NullSurface`] (headless no-op) and [`MockSurface`]
//! (recording, for tests) ship with the crate.
//!
//! Surface failures never propagate to callers: they are absorbed, published
//! as [`EventKind::SurfaceDegraded`] events, and the call degrades to a
//! no-op.
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use busyvisor::{BusyIndicator, Config, RequestSpec};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let busy = BusyIndicator::builder(Config::default()).build();
//!
//!     // Two overlapping operations, one on-screen indicator.
//!     busy.start("load-users");
//!     busy.start_with(
//!         "load-posts",
//!         RequestSpec::new().with_timeout(Duration::from_secs(10)).modal(),
//!     );
//!     assert_eq!(busy.status().len(), 2);
//!
//!     busy.stop("load-users");
//!     busy.stop("load-posts");
//!     assert!(!busy.is_busy());
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod requests;
mod subscribers;
mod surface;

// ---- Public re-exports ----

pub use crate::core::{BusyIndicator, IndicatorBuilder};

pub use config::Config;
pub use error::SurfaceError;
pub use events::{Bus, Event, EventKind};
pub use requests::{BusyRequest, RequestSpec};
pub use subscribers::{Subscribe, SubscriberSet};
pub use surface::{Layer, MockSurface, NullSurface, Surface};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
