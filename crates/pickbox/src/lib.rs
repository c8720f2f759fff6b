//! Pickbox: a searchable combo box for the browser.
//!
//! The widget and its state machine live in [`widgets`]; this crate mounts
//! one on an HTML canvas, wires DOM events to it and paints its draw commands
//! with the Canvas2D API.
//!
//! # Browser Usage (WASM)
//!
//! ```javascript
//! import init, { ComboBoxApp } from './pickbox.js';
//!
//! async function main() {
//!     await init();
//!     const app = new ComboBoxApp('combo', JSON.stringify(story));
//!     app.on_change((id) => app.set_value(id));
//! }
//! ```

pub use pickbox_core::*;
pub use pickbox_widgets as widgets;

pub mod browser;

pub use browser::{parse_story, AppError};

#[cfg(target_arch = "wasm32")]
pub use browser::{Canvas2DRenderer, ComboBoxApp};
