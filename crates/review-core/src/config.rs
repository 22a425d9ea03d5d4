//! Viewer configuration
//!
//! Every field has a default matching the shipped behavior, so an empty TOML
//! or JSON document is a valid configuration.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::ReviewError;

/// Bounds and padding used by the scale controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    /// Horizontal space reserved around the page inside the pane
    pub padding_px: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            padding_px: 80.0,
            min_scale: 0.5,
            max_scale: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub scale: ScaleConfig,
    /// Fallback delay before scrolling to an activated page
    pub scroll_delay_ms: u32,
    /// Initial width of the PDF pane, in percent of the container
    pub default_left_pane_percent: f64,
    /// Smallest width either pane may be dragged to, in percent
    pub min_pane_percent: f64,
    /// Storage key holding the selected document
    pub selection_key: String,
    /// Prefix for every request made by the HTTP client
    pub api_base_url: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            scale: ScaleConfig::default(),
            scroll_delay_ms: 100,
            default_left_pane_percent: 50.0,
            min_pane_percent: 30.0,
            selection_key: "selectedDocument".to_string(),
            api_base_url: String::new(),
        }
    }
}

impl ViewerConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed, or
    /// the values fail [`ViewerConfig::validate`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    ///
    /// ```
    /// use review_core::config::ViewerConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = ViewerConfig::from_toml_str(r#"
    ///     scroll_delay_ms = 150
    ///
    ///     [scale]
    ///     max_scale = 3.0
    /// "#)?;
    /// assert_eq!(config.scroll_delay_ms, 150);
    /// assert_eq!(config.scale.min_scale, 0.5);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration handed over from the page as JSON
    pub fn from_json_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(s).context("Failed to parse JSON configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReviewError> {
        let scale = &self.scale;
        if !(scale.min_scale > 0.0 && scale.min_scale.is_finite()) {
            return Err(ReviewError::Validation(format!(
                "min_scale must be positive, got {}",
                scale.min_scale
            )));
        }
        if !(scale.max_scale >= scale.min_scale && scale.max_scale.is_finite()) {
            return Err(ReviewError::Validation(format!(
                "max_scale ({}) must not be below min_scale ({})",
                scale.max_scale, scale.min_scale
            )));
        }
        if !(scale.padding_px >= 0.0 && scale.padding_px.is_finite()) {
            return Err(ReviewError::Validation(format!(
                "padding_px must be non-negative, got {}",
                scale.padding_px
            )));
        }
        if !(self.min_pane_percent > 0.0 && self.min_pane_percent <= 50.0) {
            return Err(ReviewError::Validation(format!(
                "min_pane_percent must be in (0, 50], got {}",
                self.min_pane_percent
            )));
        }
        let max_left = 100.0 - self.min_pane_percent;
        if self.default_left_pane_percent < self.min_pane_percent
            || self.default_left_pane_percent > max_left
        {
            return Err(ReviewError::Validation(format!(
                "default_left_pane_percent must be in [{}, {}], got {}",
                self.min_pane_percent, max_left, self.default_left_pane_percent
            )));
        }
        if self.selection_key.is_empty() {
            return Err(ReviewError::Validation(
                "selection_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
