//! # Indicator configuration.
//!
//! [`Config`] centralizes the tunables of a [`BusyIndicator`](crate::BusyIndicator):
//! the default request timeout, the fade-out grace delay, and the event bus
//! capacity.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use busyvisor::Config;
//!
//! let mut cfg = Config::default();
//! cfg.default_timeout = Duration::from_secs(15);
//! cfg.fade_grace = Duration::from_millis(250);
//!
//! assert_eq!(cfg.fade_grace, Duration::from_millis(250));
//! ```

use std::time::Duration;

/// Configuration for a [`BusyIndicator`](crate::BusyIndicator) instance.
#[derive(Clone, Debug)]
pub struct Config {
    /// Timeout applied to requests that don't specify one (or specify zero).
    ///
    /// A request that is never stopped is auto-dequeued once this elapses.
    pub default_timeout: Duration,
    /// Delay between starting a fade-out and fully hiding a layer.
    ///
    /// A fresh show request arriving within this window cancels the hide.
    pub fade_grace: Duration,
    /// Capacity of the event bus channel.
    pub bus_capacity: usize,
}

impl Default for Config {
    /// Provides a default configuration:
    /// - `default_timeout = 7s`
    /// - `fade_grace = 500ms`
    /// - `bus_capacity = 256`
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_secs(7),
            fade_grace: Duration::from_millis(500),
            bus_capacity: 256,
        }
    }
}

impl Config {
    /// Bus capacity with the minimum of 1 enforced.
    pub(crate) fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Resolves a caller-supplied timeout against the configured default.
    ///
    /// `None` and non-positive durations both fall back to
    /// [`Config::default_timeout`].
    pub(crate) fn effective_timeout(&self, requested: Option<Duration>) -> Duration {
        match requested {
            Some(t) if t > Duration::ZERO => t,
            _ => self.default_timeout,
        }
    }
}
