//! Error types used at the rendering-surface boundary.
//!
//! The public `start`/`stop`/`reset`/`status` API is infallible: every
//! failure below it is absorbed and reported through the event bus as
//! [`EventKind::SurfaceDegraded`](crate::EventKind::SurfaceDegraded). The one
//! place errors do cross an interface is the [`Surface`](crate::Surface)
//! trait, whose adapters talk to a real rendering backend that can be
//! missing or broken at call time.

use thiserror::Error;

/// # Errors produced by a rendering-surface adapter.
///
/// Returned by [`Surface`](crate::Surface) implementations; the reconciler
/// never propagates them to callers. The worst observable symptom of a
/// surface fault is the indicator failing to show or hide.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// A required rendering target (container element, document) is missing.
    #[error("rendering surface unavailable: {what}")]
    Unavailable {
        /// What was looked for and not found.
        what: String,
    },

    /// The backend rejected or failed an operation.
    #[error("surface backend error: {message}")]
    Backend {
        /// The underlying error message.
        message: String,
    },
}

impl SurfaceError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use busyvisor::SurfaceError;
    ///
    /// let err = SurfaceError::Unavailable { what: "top-level document".into() };
    /// assert_eq!(err.as_label(), "surface_unavailable");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SurfaceError::Unavailable { .. } => "surface_unavailable",
            SurfaceError::Backend { .. } => "surface_backend",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SurfaceError::Unavailable { what } => format!("unavailable: {what}"),
            SurfaceError::Backend { message } => format!("backend: {message}"),
        }
    }
}
