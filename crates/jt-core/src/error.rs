use thiserror::Error;

/// Malformed startup configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("`{key}` expects a number, got `{value}`")]
    InvalidNumber { key: String, value: String },
    #[error("`{key}` expects a boolean (1/0, true/false, on/off), got `{value}`")]
    InvalidBool { key: String, value: String },
    #[error("`scan_ms` must be a positive, finite duration, got {0}")]
    InvalidScanTimeConstant(f64),
    #[error("`smoothing` must lie in (0, 1], got {0}")]
    InvalidSmoothing(f32),
}
