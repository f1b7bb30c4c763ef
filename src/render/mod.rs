//! Drawing layer
//!
//! Games draw through the [`Surface`] trait so the simulation stays free of
//! platform types. The wasm build provides a Canvas 2D implementation; tests
//! and the native headless binary use [`NullSurface`].

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod overlay;
pub mod surface;
pub mod theme;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use surface::{NullSurface, Surface, TextAlign};
pub use theme::Palette;
