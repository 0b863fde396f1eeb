//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the provider and the
//! HTTP layer. Request handling never reads process-wide environment variables.

use crate::constants::DEFAULT_MAX_UPLOAD_BYTES;
use crate::{ScenarioError, ScenarioResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    default_use_sample: bool,
    max_upload_bytes: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::InvalidInput` if `max_upload_bytes` is zero.
    pub fn new(default_use_sample: bool, max_upload_bytes: usize) -> ScenarioResult<Self> {
        if max_upload_bytes == 0 {
            return Err(ScenarioError::InvalidInput(
                "max_upload_bytes must be greater than zero".into(),
            ));
        }

        Ok(Self {
            default_use_sample,
            max_upload_bytes,
        })
    }

    /// Initial state of the "Use Sample Case" toggle for a fresh session.
    pub fn default_use_sample(&self) -> bool {
        self.default_use_sample
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_use_sample: true,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Parse the default toggle state from an optional string value.
///
/// `None` or an empty/whitespace value means `true`. Accepts `true/false`, `1/0`, `yes/no` and
/// `on/off`, case-insensitively.
pub fn use_sample_from_env_value(value: Option<String>) -> ScenarioResult<bool> {
    let value = value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty());

    match value.as_deref() {
        None => Ok(true),
        Some("true" | "1" | "yes" | "on") => Ok(true),
        Some("false" | "0" | "no" | "off") => Ok(false),
        Some(other) => Err(ScenarioError::InvalidInput(format!(
            "OSCE_USE_SAMPLE must be a boolean, got '{other}'"
        ))),
    }
}

/// Parse the upload size limit from an optional string value.
///
/// `None` or an empty/whitespace value means [`DEFAULT_MAX_UPLOAD_BYTES`].
pub fn max_upload_bytes_from_env_value(value: Option<String>) -> ScenarioResult<usize> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_MAX_UPLOAD_BYTES),
        Some(v) => v.parse::<usize>().map_err(|e| {
            ScenarioError::InvalidInput(format!("OSCE_MAX_UPLOAD_BYTES is not a size: {e}"))
        }),
    }
}
