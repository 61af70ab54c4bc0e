//! # Mapmark Settings
//!
//! Configuration for the Mapmark editor: guide-line behavior (alignment
//! threshold, snap-on-release, display style), stage defaults, and text
//! defaults, with JSON persistence to a per-user configuration directory.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{EditorConfig, GuideConfig, GuideStyle, StageConfig, TextConfig};
pub use error::SettingsError;
pub use persistence::SettingsPersistence;
