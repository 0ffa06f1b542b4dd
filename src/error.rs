//! Error taxonomy shared by the core and the hosts.

use thiserror::Error;

/// Every failure the effects can run into.
///
/// None of these are fatal to the page: each one ends the operation that raised it
/// and leaves the rest of the effects running.
#[derive(Debug, Error)]
pub enum FxError {
    /// An element the page markup is expected to carry is not there.
    #[error("element not found: {0}")]
    MissingElement(String),
    /// A browser capability (clipboard, storage, animation frames, ...) is unavailable.
    #[error("capability unavailable: {0}")]
    Unsupported(&'static str),
    /// Reading or writing durable storage failed.
    #[error("storage error: {0}")]
    Storage(String),
    /// A clipboard write was rejected.
    #[error("clipboard error: {0}")]
    Clipboard(String),
    /// The frame scheduler refused to schedule a callback.
    #[error("frame scheduling failed: {0}")]
    Scheduler(String),
    /// A host call raised an exception.
    #[error("host error: {0}")]
    Js(String),
    /// Configuration JSON could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl FxError {
    /// Returns true for conditions that are part of normal operation and should
    /// only be logged at debug level.
    pub fn is_expected(&self) -> bool {
        matches!(self, FxError::MissingElement(_))
    }
}

/// Convenience alias used across the crate.
pub type FxResult<T> = Result<T, FxError>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for FxError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        FxError::Js(format!("{:?}", value))
    }
}

/// Logs an error at a level matching how surprising it is.
pub fn log_error(context: &str, error: &FxError) {
    if error.is_expected() {
        log::debug!("{context}: {error}");
    } else {
        log::warn!("{context}: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_element_is_expected() {
        assert!(FxError::MissingElement("cursor-dot".into()).is_expected());
        assert!(!FxError::Clipboard("denied".into()).is_expected());
    }

    #[test]
    fn config_errors_convert_from_serde() {
        let err: FxError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, FxError::Config(_)));
        assert!(err.to_string().starts_with("invalid configuration"));
    }
}
