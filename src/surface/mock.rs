//! # Recording surface for tests.
//!
//! [`MockSurface`] implements [`Surface`] over plain in-memory state so the
//! reconciler can be exercised without a rendering backend: tests assert on
//! what the indicator *did* to each layer (created, visible, opacity,
//! stacking, label) rather than on pixels. Failure injection covers the
//! degraded-surface paths.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use busyvisor::{BusyIndicator, Config, Layer, MockSurface};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let surface = Arc::new(MockSurface::new());
//!     let busy = BusyIndicator::builder(Config::default())
//!         .with_surface(surface.clone())
//!         .build();
//!
//!     busy.start("load");
//!     assert!(surface.visible(Layer::Spinner));
//!     assert_eq!(surface.label(), "load");
//! }
//! ```

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::error::SurfaceError;

use super::surface::{Layer, Surface};

#[derive(Debug, Default, Clone)]
struct LayerRecord {
    exists: bool,
    visible: bool,
    opacity: f64,
    stacking: i64,
    creates: u32,
}

#[derive(Debug, Default)]
struct MockState {
    layers: HashMap<Layer, LayerRecord>,
    label: String,
    stacking_floor: i64,
    failing: bool,
}

/// In-memory [`Surface`] that records every mutation.
#[derive(Debug, Default)]
pub struct MockSurface {
    state: Mutex<MockState>,
}

impl MockSurface {
    /// Construct a new [`MockSurface`] with no layers created.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value [`Surface::max_stacking_order`] reports.
    pub fn set_stacking_floor(&self, order: i64) {
        self.state.lock().stacking_floor = order;
    }

    /// Makes every subsequent mutating call fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.state.lock().failing = failing;
    }

    /// Whether the layer's element has been created.
    pub fn exists(&self, layer: Layer) -> bool {
        self.state
            .lock()
            .layers
            .get(&layer)
            .map(|r| r.exists)
            .unwrap_or(false)
    }

    /// Whether the layer is currently shown (created + visible).
    pub fn visible(&self, layer: Layer) -> bool {
        self.state
            .lock()
            .layers
            .get(&layer)
            .map(|r| r.exists && r.visible)
            .unwrap_or(false)
    }

    /// The layer's last-set opacity.
    pub fn opacity(&self, layer: Layer) -> f64 {
        self.state
            .lock()
            .layers
            .get(&layer)
            .map(|r| r.opacity)
            .unwrap_or(0.0)
    }

    /// The layer's last-set stacking order.
    pub fn stacking(&self, layer: Layer) -> i64 {
        self.state
            .lock()
            .layers
            .get(&layer)
            .map(|r| r.stacking)
            .unwrap_or(0)
    }

    /// How many times the layer's element was created.
    pub fn creates(&self, layer: Layer) -> u32 {
        self.state
            .lock()
            .layers
            .get(&layer)
            .map(|r| r.creates)
            .unwrap_or(0)
    }

    /// The spinner's last-set label.
    pub fn label(&self) -> String {
        self.state.lock().label.clone()
    }

    fn mutate<F>(&self, layer: Layer, f: F) -> Result<(), SurfaceError>
    where
        F: FnOnce(&mut LayerRecord),
    {
        let mut state = self.state.lock();
        if state.failing {
            return Err(SurfaceError::Backend {
                message: "injected failure".into(),
            });
        }
        let record = state.layers.entry(layer).or_default();
        if !record.exists {
            return Err(SurfaceError::Unavailable {
                what: format!("{} element", layer.as_str()),
            });
        }
        f(record);
        Ok(())
    }
}

impl Surface for MockSurface {
    fn exists(&self, layer: Layer) -> bool {
        MockSurface::exists(self, layer)
    }

    fn create(&self, layer: Layer) -> Result<(), SurfaceError> {
        let mut state = self.state.lock();
        if state.failing {
            return Err(SurfaceError::Unavailable {
                what: format!("container for {}", layer.as_str()),
            });
        }
        let record = state.layers.entry(layer).or_default();
        record.exists = true;
        record.creates += 1;
        Ok(())
    }

    fn set_visible(&self, layer: Layer, visible: bool) -> Result<(), SurfaceError> {
        self.mutate(layer, |r| r.visible = visible)
    }

    fn set_opacity(&self, layer: Layer, opacity: f64) -> Result<(), SurfaceError> {
        self.mutate(layer, |r| r.opacity = opacity)
    }

    fn set_stacking(&self, layer: Layer, order: i64) -> Result<(), SurfaceError> {
        self.mutate(layer, |r| r.stacking = order)
    }

    fn set_label(&self, label: &str) -> Result<(), SurfaceError> {
        let mut state = self.state.lock();
        if state.failing {
            return Err(SurfaceError::Backend {
                message: "injected failure".into(),
            });
        }
        state.label = label.to_string();
        Ok(())
    }

    fn max_stacking_order(&self) -> i64 {
        self.state.lock().stacking_floor
    }
}
