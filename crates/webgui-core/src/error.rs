//! Error types for webgui-core.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UiError {
    #[error("Request to {url} failed: {reason}")]
    Http { url: String, reason: String },

    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown message type: {0}")]
    UnknownMessage(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, UiError>;
