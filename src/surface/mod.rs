//! # Rendering-surface abstraction.
//!
//! The reconciler never touches a real screen; it drives the [`Surface`]
//! capability trait. Adapters over an actual rendering backend (a DOM via
//! webview/wasm bindings, a TUI overlay, anything with elements and styles)
//! implement it outside this crate.
//!
//! ## Contents
//! - [`Surface`], [`Layer`] - the capability interface and the two layers
//!   the indicator owns
//! - [`NullSurface`] - headless no-op adapter
//! - [`MockSurface`] - recording adapter for tests

mod mock;
mod null;
#[allow(clippy::module_inception)]
mod surface;

pub use mock::MockSurface;
pub use null::NullSurface;
pub use surface::{Layer, Surface};
