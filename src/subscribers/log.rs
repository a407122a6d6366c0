//! # LogWriter - simple event printer.
//!
//! A minimal subscriber that prints incoming [`Event`]s, warnings to stderr
//! and the rest to stdout. Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [queued] id="load-users" timeout=7000ms modal=false pending=1
//! [shown] layer=spinner
//! [finished] id="load-users" pending=0
//! [expired] id="load-posts" pending=0
//! [fading] layer=spinner
//! [hidden] layer=spinner
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn layer_str(e: &Event) -> &'static str {
    e.layer.map(|l| l.as_str()).unwrap_or("?")
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::RequestQueued => {
                println!(
                    "[queued] id={:?} timeout={}ms modal={} pending={}",
                    e.id.as_deref().unwrap_or(""),
                    e.timeout_ms.unwrap_or(0),
                    e.modal.unwrap_or(false),
                    e.pending.unwrap_or(0),
                );
            }
            EventKind::RequestReplaced => {
                println!("[replaced] id={:?}", e.id.as_deref().unwrap_or(""));
            }
            EventKind::RequestFinished => {
                println!(
                    "[finished] id={:?} pending={}",
                    e.id.as_deref().unwrap_or(""),
                    e.pending.unwrap_or(0),
                );
            }
            EventKind::RequestExpired => {
                eprintln!(
                    "[expired] busy indication timed out waiting for {:?} to finish (pending={})",
                    e.id.as_deref().unwrap_or(""),
                    e.pending.unwrap_or(0),
                );
            }
            EventKind::QueueCleared => {
                println!("[cleared] dropped={}", e.pending.unwrap_or(0));
            }
            EventKind::LayerShown => {
                println!("[shown] layer={}", layer_str(e));
            }
            EventKind::LayerFading => {
                println!("[fading] layer={}", layer_str(e));
            }
            EventKind::LayerHidden => {
                println!("[hidden] layer={}", layer_str(e));
            }
            EventKind::SurfaceDegraded => {
                eprintln!(
                    "[surface-degraded] layer={} reason={:?}",
                    layer_str(e),
                    e.reason.as_deref().unwrap_or("unknown"),
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
