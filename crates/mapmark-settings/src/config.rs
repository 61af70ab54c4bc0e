//! Editor configuration model.
//!
//! Groups the tunable behavior of the editing engine: guide-line alignment,
//! stage dimensions and auto-expansion, and text defaults. All values are
//! serde-ready and validated before use.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SettingsError};

/// How guide lines are drawn while a shape is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GuideStyle {
    /// Guides are computed but not rendered.
    None,
    /// Continuous lines.
    Solid,
    /// Dashed lines.
    #[default]
    Dotted,
}

/// Guide-line alignment behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideConfig {
    /// Alignment distance in stage pixels. A moving edge strictly closer
    /// than this to a static edge produces a guide line.
    pub threshold: f64,
    /// Apply the minimal snap offset when the drag is released.
    pub stick: bool,
    /// Render style for active guide lines.
    pub style: GuideStyle,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            threshold: 10.0,
            stick: true,
            style: GuideStyle::Dotted,
        }
    }
}

/// Stage dimensions and auto-expansion behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    /// Initial stage width in pixels.
    pub width: f64,
    /// Initial stage height in pixels.
    pub height: f64,
    /// Growth factor applied when a shape box crosses the stage edge.
    pub expand_ratio: f64,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
            expand_ratio: 1.05,
        }
    }
}

/// Defaults applied to newly created text shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextConfig {
    pub font_family: String,
    pub font_size: f64,
    pub line_height: f64,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 26.0,
            line_height: 1.0,
        }
    }
}

/// Top-level editor configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub guides: GuideConfig,
    pub stage: StageConfig,
    pub text: TextConfig,
}

impl EditorConfig {
    /// Validates every section, returning the first offending key.
    pub fn validate(&self) -> Result<()> {
        if !(self.guides.threshold > 0.0) {
            return Err(SettingsError::InvalidSetting {
                key: "guides.threshold".to_string(),
                reason: format!("must be positive, got {}", self.guides.threshold),
            });
        }
        if !(self.stage.width > 0.0) || !(self.stage.height > 0.0) {
            return Err(SettingsError::InvalidSetting {
                key: "stage".to_string(),
                reason: format!(
                    "dimensions must be positive, got {}x{}",
                    self.stage.width, self.stage.height
                ),
            });
        }
        if self.stage.expand_ratio < 1.0 {
            return Err(SettingsError::InvalidSetting {
                key: "stage.expand_ratio".to_string(),
                reason: format!("must be at least 1.0, got {}", self.stage.expand_ratio),
            });
        }
        if self.text.font_size < 1.0 {
            return Err(SettingsError::InvalidSetting {
                key: "text.font_size".to_string(),
                reason: format!("must be at least 1, got {}", self.text.font_size),
            });
        }
        if self.text.line_height <= 0.0 {
            return Err(SettingsError::InvalidSetting {
                key: "text.line_height".to_string(),
                reason: format!("must be positive, got {}", self.text.line_height),
            });
        }
        Ok(())
    }
}
