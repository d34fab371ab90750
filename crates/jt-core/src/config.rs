//! Startup configuration shared by the frontends.
//!
//! The web frontend feeds it the query string (`?coupling=1.2&auto=0`), the
//! native one its `key=value` command line arguments.

use crate::constants::{
    COUPLING_MAX, COUPLING_MIN, DEFAULT_COUPLING, DISTORTION_MAX, DISTORTION_MIN,
    SCAN_TIME_CONSTANT_MS, SMOOTHING_ALPHA,
};
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq)]
pub struct VisualizerConfig {
    pub initial_distortion: f32,
    pub coupling: f32,
    pub auto_play: bool,
    pub scan_time_constant_ms: f64,
    pub smoothing: f32,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            initial_distortion: DISTORTION_MIN,
            coupling: DEFAULT_COUPLING,
            auto_play: true,
            scan_time_constant_ms: SCAN_TIME_CONSTANT_MS,
            smoothing: SMOOTHING_ALPHA,
        }
    }
}

impl VisualizerConfig {
    /// Build a config from `(key, value)` pairs on top of the defaults.
    ///
    /// Unknown keys are skipped; distortion and coupling are clamped into range.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut cfg = Self::default();
        for (key, value) in pairs {
            let value = value.trim();
            match key.trim() {
                "distortion" => {
                    let v = parse_f32(key, value)?;
                    cfg.initial_distortion = clamp_logged(key, v, DISTORTION_MIN, DISTORTION_MAX);
                }
                "coupling" => {
                    let v = parse_f32(key, value)?;
                    cfg.coupling = clamp_logged(key, v, COUPLING_MIN, COUPLING_MAX);
                }
                "auto" => cfg.auto_play = parse_bool(key, value)?,
                "scan_ms" => cfg.scan_time_constant_ms = f64::from(parse_f32(key, value)?),
                "smoothing" => cfg.smoothing = parse_f32(key, value)?,
                other => log::warn!("[config] ignoring unknown key `{}`", other),
            }
        }
        cfg.validate()
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if !(self.scan_time_constant_ms.is_finite() && self.scan_time_constant_ms > 0.0) {
            return Err(ConfigError::InvalidScanTimeConstant(self.scan_time_constant_ms));
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(ConfigError::InvalidSmoothing(self.smoothing));
        }
        Ok(self)
    }
}

fn parse_f32(key: &str, value: &str) -> Result<f32, ConfigError> {
    value
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn clamp_logged(key: &str, v: f32, min: f32, max: f32) -> f32 {
    let clamped = v.clamp(min, max);
    if clamped != v {
        log::warn!("[config] `{}`={} clamped to {}", key, v, clamped);
    }
    clamped
}
