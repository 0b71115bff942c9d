// SPDX-License-Identifier: MIT OR Apache-2.0
//! Preview settings.
//!
//! Settings live in a RON file next to the animation. A missing file means
//! defaults; a file written by a newer version is rejected.

use crate::error::{PreviewError, PreviewResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tweenline_sequencer::{Animation, PlayMode, WrapMode};

/// Current settings format version
pub const SETTINGS_FORMAT_VERSION: u32 = 1;

/// Settings file name looked up when none is given
pub const SETTINGS_FILE_NAME: &str = "preview.ron";

/// Log filter used when neither `RUST_LOG` nor the settings set one
pub const DEFAULT_LOG_FILTER: &str = "tweenline_sequencer=info,tweenline_preview=info";

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

/// Settings for a preview run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewSettings {
    /// Settings format version
    pub version: u32,
    /// Simulated frames per second
    pub frame_rate: f32,
    /// Replaces the animation's duration
    #[serde(default)]
    pub duration: Option<f32>,
    /// Replaces the animation's playback speed multiplier
    #[serde(default)]
    pub time_scale: Option<f32>,
    /// Replaces the animation's wrap mode
    #[serde(default)]
    pub wrap_mode: Option<WrapMode>,
    /// Replaces the animation's play mode
    #[serde(default)]
    pub play_mode: Option<PlayMode>,
    /// Tracing filter directives
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Upper bound on simulated frames
    pub max_frames: u32,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_FORMAT_VERSION,
            frame_rate: 60.0,
            duration: None,
            time_scale: None,
            wrap_mode: None,
            play_mode: None,
            log_filter: default_log_filter(),
            max_frames: 600,
        }
    }
}

impl PreviewSettings {
    /// Parse settings from RON
    pub fn from_ron(s: &str) -> PreviewResult<Self> {
        let settings: PreviewSettings = ron::from_str(s)?;

        // Version check
        if settings.version > SETTINGS_FORMAT_VERSION {
            return Err(PreviewError::UnsupportedSettings {
                found: settings.version,
                supported: SETTINGS_FORMAT_VERSION,
            });
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> PreviewResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> PreviewResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> PreviewResult<()> {
        let config = ron::ser::PrettyConfig::default().struct_names(true);
        let content = ron::ser::to_string_pretty(self, config)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Replace the frame rate
    pub fn with_frame_rate(mut self, frame_rate: f32) -> PreviewResult<Self> {
        self.frame_rate = frame_rate;
        self.validate()?;
        Ok(self)
    }

    /// Seconds per simulated frame
    pub fn frame_time(&self) -> f32 {
        1.0 / self.frame_rate
    }

    fn validate(&self) -> PreviewResult<()> {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(PreviewError::InvalidFrameRate(self.frame_rate));
        }
        if let Some(scale) = self.time_scale {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(PreviewError::InvalidTimeScale(scale));
            }
        }
        Ok(())
    }

    /// Apply the overrides to an animation
    pub fn apply_to(&self, animation: &mut Animation) {
        if let Some(duration) = self.duration {
            animation.set_duration(duration);
        }
        if let Some(wrap_mode) = self.wrap_mode {
            animation.wrap_mode = wrap_mode;
        }
        if let Some(play_mode) = self.play_mode {
            animation.play_mode = play_mode;
        }
        if let Some(time_scale) = self.time_scale {
            animation.time_scale = time_scale;
        }
    }
}
