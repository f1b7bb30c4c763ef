//! Platform glue
//!
//! The browser build exposes [`web::GameHandle`] through wasm-bindgen; the
//! native build runs headless and only needs a clock.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::GameHandle;
