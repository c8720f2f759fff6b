//! Browser runtime for Pickbox combo boxes.
//!
//! This module bridges the widget to the browser: DOM events in, Canvas2D
//! drawing out, and a document-level pointer listener for dismissal.

mod error;

// WASM-only modules
#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod canvas2d;
#[cfg(target_arch = "wasm32")]
pub mod dismissal;
#[cfg(target_arch = "wasm32")]
pub mod events;

pub use error::{parse_story, AppError};

#[cfg(target_arch = "wasm32")]
pub use app::ComboBoxApp;
#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2DRenderer;
#[cfg(target_arch = "wasm32")]
pub use dismissal::{DocumentPointerSource, ListenerGuard};
