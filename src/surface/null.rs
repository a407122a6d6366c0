//! Headless no-op surface.

use crate::error::SurfaceError;

use super::surface::{Layer, Surface};

/// A [`Surface`] that renders nothing and never fails.
///
/// Default surface of [`IndicatorBuilder`](crate::IndicatorBuilder): the
/// queue, timeout, and event machinery all run normally, only the visuals are
/// absent. Useful headless (tests, prerendering) where the indicator has no
/// meaning but the calling code shouldn't need to care.
#[derive(Debug, Default)]
pub struct NullSurface;

impl NullSurface {
    /// Construct a new [`NullSurface`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Surface for NullSurface {
    fn exists(&self, _layer: Layer) -> bool {
        true
    }

    fn create(&self, _layer: Layer) -> Result<(), SurfaceError> {
        Ok(())
    }

    fn set_visible(&self, _layer: Layer, _visible: bool) -> Result<(), SurfaceError> {
        Ok(())
    }

    fn set_opacity(&self, _layer: Layer, _opacity: f64) -> Result<(), SurfaceError> {
        Ok(())
    }

    fn set_stacking(&self, _layer: Layer, _order: i64) -> Result<(), SurfaceError> {
        Ok(())
    }

    fn set_label(&self, _label: &str) -> Result<(), SurfaceError> {
        Ok(())
    }

    fn max_stacking_order(&self) -> i64 {
        0
    }
}
