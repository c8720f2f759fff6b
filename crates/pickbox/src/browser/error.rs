//! Errors raised while mounting a combo box in the page.

use pickbox_widgets::{ComboBoxError, ComboBoxProps};
use thiserror::Error;

/// Failure to mount a combo box in the page.
#[derive(Debug, Error)]
pub enum AppError {
    /// No `window` or `document` (not running in a page)
    #[error("no {0} available")]
    NoWindow(&'static str),
    /// Canvas element lookup failed
    #[error("canvas '{0}' not found")]
    CanvasNotFound(String),
    /// Element exists but is not a canvas
    #[error("element '{0}' is not a canvas")]
    NotACanvas(String),
    /// The 2D context could not be obtained
    #[error("2d context unavailable: {0}")]
    Context(String),
    /// Story JSON did not parse
    #[error("invalid story: {0}")]
    Story(#[from] serde_json::Error),
    /// Props name an unknown option
    #[error(transparent)]
    Props(#[from] ComboBoxError),
}

#[cfg(target_arch = "wasm32")]
impl From<AppError> for wasm_bindgen::JsValue {
    fn from(err: AppError) -> Self {
        Self::from_str(&err.to_string())
    }
}

/// Parse story JSON into combo box props.
pub fn parse_story(json: &str) -> Result<ComboBoxProps, AppError> {
    Ok(serde_json::from_str(json)?)
}
