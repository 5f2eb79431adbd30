//! Error types used by the crate.

use thiserror::Error;

use crate::control::RequestKind;
use crate::geolocation::GeolocationError;

/// Signal map error type.
#[derive(Debug, Error)]
pub enum SignalMapError {
    /// I/O error (network or file).
    #[error("failed to load data")]
    IO,
    /// Server answered with a non-success status.
    #[error("failed to load data: HTTP status {0}")]
    HttpStatus(u16),
    /// Dataset is not valid JSON of the expected shape.
    #[error("failed to decode dataset: {0}")]
    Decoding(#[from] serde_json::Error),
    /// Dataset record is well-formed but its content is invalid.
    #[error("invalid dataset record #{index}: {reason}")]
    InvalidRecord {
        /// Position of the record in the dataset.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },
    /// Filter control value does not name any known tag.
    #[error("unknown filter value: {0:?}")]
    UnknownTag(String),
    /// Invalid widget configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// The widget cannot be built without the named collaborator.
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),
    /// A one-shot request of the same kind has not completed yet.
    #[error("{0} request is already in flight")]
    RequestInFlight(RequestKind),
    /// Completion does not belong to the currently running request.
    #[error("{0} completion does not match a pending request")]
    StaleRequest(RequestKind),
    /// Geolocation lookup failed.
    #[error("geolocation failed: {0}")]
    Geolocation(#[from] GeolocationError),
    /// Error interacting with WASM runtime.
    #[error("wasm error: {0:?}")]
    Wasm(Option<String>),
    /// Error reading data from the FS.
    #[error("failed to read file")]
    FsIo(#[from] std::io::Error),
    /// Generic error - details are inside.
    #[error("{0}")]
    Generic(String),
}

#[cfg(not(target_arch = "wasm32"))]
impl From<reqwest::Error> for SignalMapError {
    fn from(value: reqwest::Error) -> Self {
        log::debug!("Request failed: {value}");
        Self::IO
    }
}

impl From<strfmt::FmtError> for SignalMapError {
    fn from(value: strfmt::FmtError) -> Self {
        Self::Config(value.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SignalMapError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        SignalMapError::Wasm(Some(format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<js_sys::Object> for SignalMapError {
    fn from(value: js_sys::Object) -> Self {
        SignalMapError::Wasm(Some(format!("Failed to cast {value:?} into target type")))
    }
}
