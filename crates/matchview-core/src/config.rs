use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MARKER_SIZE, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVER_URL};
use crate::error::{MatchViewError, Result};
use crate::model::MatchClassFilter;
use crate::render::DisplayFlags;
use crate::viewport::ZoomLimits;

/// Viewer defaults, read from a TOML file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub server_url: String,
    pub request_timeout_secs: u64,
    pub display: DisplayConfig,
    /// Scale clamp for pan/zoom. Absent means unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_limits: Option<ZoomLimits>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            display: DisplayConfig::default(),
            zoom_limits: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub marker_size: f64,
    pub show_markers: bool,
    pub show_lines: bool,
    pub only_matched: bool,
    pub show_inliers: bool,
    pub show_outliers: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            marker_size: DEFAULT_MARKER_SIZE,
            show_markers: true,
            show_lines: false,
            only_matched: false,
            show_inliers: true,
            show_outliers: false,
        }
    }
}

impl DisplayConfig {
    pub fn flags(&self) -> DisplayFlags {
        DisplayFlags {
            show_markers: self.show_markers,
            show_lines: self.show_lines,
            only_matched: self.only_matched,
            marker_size: self.marker_size,
        }
    }

    pub fn class_filter(&self) -> MatchClassFilter {
        MatchClassFilter {
            inliers: self.show_inliers,
            outliers: self.show_outliers,
        }
    }
}

impl ViewerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| MatchViewError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| MatchViewError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.display.marker_size.is_finite() && self.display.marker_size > 0.0) {
            return Err(MatchViewError::Config(format!(
                "marker_size must be positive, got {}",
                self.display.marker_size
            )));
        }
        if let Some(limits) = self.zoom_limits {
            if !limits.is_valid() {
                return Err(MatchViewError::Config(format!(
                    "zoom_limits must satisfy 0 < min <= max, got [{}, {}]",
                    limits.min, limits.max
                )));
            }
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
