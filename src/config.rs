use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::utils::display::DisplayMode;

/// Rendering and display settings for the metrics figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1200)
    pub width: u32,
    /// Image height in pixels (default: 500)
    pub height: u32,
    /// Stroke width of every curve
    pub line_width: u32,
    /// When to open the saved image
    pub display: DisplayMode,
    /// Viewer command, overriding the platform default
    pub viewer: Option<String>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 500,
            line_width: 2,
            display: DisplayMode::Auto,
            viewer: None,
        }
    }
}

impl PlotConfig {
    /// Config that never opens a viewer, for batch jobs and tests
    pub fn headless() -> Self {
        Self {
            display: DisplayMode::Never,
            ..Self::default()
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
