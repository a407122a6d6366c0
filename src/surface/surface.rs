//! # The surface capability trait.
//!
//! [`Surface`] is the only rendering dependency of the indicator core. It
//! deliberately asks for very little: probe whether a layer's backing element
//! exists, create it, and set visibility / opacity / stacking / label. No
//! markup library is assumed.
//!
//! ## Adapter contract
//! - **Top-level targeting**: when the host context is embedded in a frame,
//!   attach both layers to the top-level document and scan stacking order
//!   against it, so one indicator covers the whole page. Queue state already
//!   lives in the single [`BusyIndicator`](crate::BusyIndicator) instance;
//!   adapters must not keep per-frame copies of the elements.
//! - **Idempotent creation**: `create` for an existing layer must not
//!   recreate it. The reconciler probes `exists` first, but adapters should
//!   tolerate the redundant call.
//! - **Stacking scan**: [`Surface::max_stacking_order`] returns a number
//!   `>=` every current element's stacking order. Non-numeric values
//!   ("auto", unset, legacy sentinel markers) count as 0.

use crate::error::SurfaceError;

/// The two visual layers the indicator owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// The spinner element itself.
    Spinner,
    /// The opaque modal underlay rendered beneath the spinner.
    Overlay,
}

impl Layer {
    /// Short stable label for logs and events.
    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Spinner => "spinner",
            Layer::Overlay => "overlay",
        }
    }
}

/// Capability interface over the rendering backend.
///
/// All mutating operations are fallible: a backend can be missing or broken
/// at call time (container not in the tree yet, document torn down). The
/// reconciler absorbs every error, publishes
/// [`EventKind::SurfaceDegraded`](crate::EventKind::SurfaceDegraded), and
/// degrades the call to a no-op - implementors should return errors, not
/// panic.
pub trait Surface: Send + Sync + 'static {
    /// Whether the layer's backing element currently exists.
    fn exists(&self, layer: Layer) -> bool;

    /// Creates the layer's backing element, hidden, at the adapter's
    /// configured attachment point.
    fn create(&self, layer: Layer) -> Result<(), SurfaceError>;

    /// Shows or fully hides a layer (no fade; fades are opacity-driven).
    fn set_visible(&self, layer: Layer, visible: bool) -> Result<(), SurfaceError>;

    /// Sets a layer's opacity in `0.0..=1.0`.
    fn set_opacity(&self, layer: Layer, opacity: f64) -> Result<(), SurfaceError>;

    /// Sets a layer's stacking order (z-index).
    fn set_stacking(&self, layer: Layer, order: i64) -> Result<(), SurfaceError>;

    /// Sets the spinner's display label.
    fn set_label(&self, label: &str) -> Result<(), SurfaceError>;

    /// Highest stacking order currently present in the document.
    ///
    /// Contract: the result is `>=` every element's effective stacking
    /// order, with non-numeric and sentinel "unset" values treated as 0.
    fn max_stacking_order(&self) -> i64;
}
