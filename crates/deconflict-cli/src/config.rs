//! Run configuration from environment, layered under command-line flags.

use deconflict_core::{ConfigError, DetectionSettings};
use std::env;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Log levels used when `RUST_LOG` is unset, empty or unparsable.
pub const DEFAULT_LOG_DIRECTIVES: &str = "deconflict=info,deconflict_cli=info,deconflict_core=info";

/// Log filter from a `RUST_LOG` value, falling back to [`DEFAULT_LOG_DIRECTIVES`].
pub fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}

/// Spatial dimensionality of the waypoints being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimensions {
    /// `(x, y, t)` waypoints
    Planar,
    /// `(x, y, z, t)` waypoints
    Spatial,
}

impl Dimensions {
    pub fn count(self) -> usize {
        match self {
            Dimensions::Planar => 2,
            Dimensions::Spatial => 3,
        }
    }
}

impl TryFrom<u8> for Dimensions {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Dimensions::Planar),
            3 => Ok(Dimensions::Spatial),
            other => Err(other),
        }
    }
}

/// Partially specified settings; unset fields fall through to the next layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub safety_distance_m: Option<f64>,
    pub time_step_s: Option<f64>,
    pub dimensions: Option<Dimensions>,
    pub parallel: Option<bool>,
    pub sample_end_boundary: Option<bool>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read settings through `lookup`. Values that fail to parse are
    /// logged and treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            safety_distance_m: read_setting(&lookup, "DECONFLICT_SAFETY_DISTANCE_M", parse_value),
            time_step_s: read_setting(&lookup, "DECONFLICT_TIME_STEP_S", parse_value),
            dimensions: read_setting(&lookup, "DECONFLICT_DIMENSIONS", |s| {
                parse_value::<u8>(s).and_then(|n| Dimensions::try_from(n).ok())
            }),
            parallel: read_setting(&lookup, "DECONFLICT_PARALLEL", parse_flag),
            sample_end_boundary: read_setting(&lookup, "DECONFLICT_SAMPLE_END", parse_flag),
        }
    }

    /// Fill unset fields from `fallback`.
    pub fn or(self, fallback: Config) -> Self {
        Self {
            safety_distance_m: self.safety_distance_m.or(fallback.safety_distance_m),
            time_step_s: self.time_step_s.or(fallback.time_step_s),
            dimensions: self.dimensions.or(fallback.dimensions),
            parallel: self.parallel.or(fallback.parallel),
            sample_end_boundary: self.sample_end_boundary.or(fallback.sample_end_boundary),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions.unwrap_or(Dimensions::Spatial)
    }

    /// Validated detection settings, defaults for anything still unset.
    pub fn detection_settings(&self) -> Result<DetectionSettings, ConfigError> {
        let defaults = DetectionSettings::default();
        let settings = DetectionSettings {
            safety_distance_m: self.safety_distance_m.unwrap_or(defaults.safety_distance_m),
            time_step_s: self.time_step_s.unwrap_or(defaults.time_step_s),
            sample_end_boundary: self.sample_end_boundary.unwrap_or(false),
            parallel: self.parallel.unwrap_or(false),
            ..defaults
        };
        settings.validate()?;
        Ok(settings)
    }
}

fn read_setting<T>(
    lookup: impl Fn(&str) -> Option<String>,
    name: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let raw = lookup(name)?;
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        tracing::warn!("Ignoring {}={:?}: not a valid value", name, raw);
    }
    parsed
}

fn parse_value<T: FromStr>(value: &str) -> Option<T> {
    value.parse().ok()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
