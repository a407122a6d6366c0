//! # Per-call request options.
//!
//! [`RequestSpec`] bundles the options a caller may attach to
//! [`BusyIndicator::start_with`](crate::BusyIndicator::start_with):
//! an optional timeout and the modal flag.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use busyvisor::RequestSpec;
//!
//! let spec = RequestSpec::new()
//!     .with_timeout(Duration::from_secs(10))
//!     .modal();
//!
//! assert_eq!(spec.timeout(), Some(Duration::from_secs(10)));
//! assert!(spec.is_modal());
//! ```

use std::time::Duration;

/// Options for a single `start` call.
///
/// - `timeout`: how long before the request is auto-dequeued; `None` (and
///   zero) resolve to [`Config::default_timeout`](crate::Config::default_timeout).
/// - `modal`: whether to raise the opaque modal underlay alongside the
///   spinner.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestSpec {
    timeout: Option<Duration>,
    modal: bool,
}

impl RequestSpec {
    /// Creates a spec with no explicit timeout and the modal flag unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new spec with an explicit timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns a new spec demanding the modal underlay.
    pub fn modal(mut self) -> Self {
        self.modal = true;
        self
    }

    /// Returns the explicit timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Whether this request demands the modal underlay.
    pub fn is_modal(&self) -> bool {
        self.modal
    }
}
