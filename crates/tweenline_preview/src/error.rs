// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors surfaced by the preview tool.

use thiserror::Error;
use tweenline_sequencer::AnimationFileError;

/// Preview errors
#[derive(Debug, Error)]
pub enum PreviewError {
    /// File could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Animation document could not be loaded or saved
    #[error("Animation error: {0}")]
    Animation(#[from] AnimationFileError),

    /// Scene or settings file is not valid RON
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Scene or settings could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] ron::Error),

    /// Settings were written by a newer version
    #[error("Settings version {found} is newer than supported version {supported}")]
    UnsupportedSettings {
        /// Version found in the file
        found: u32,
        /// Newest supported version
        supported: u32,
    },

    /// Frame rate is not a positive number
    #[error("Invalid frame rate: {0}")]
    InvalidFrameRate(f32),

    /// Time scale is not a positive number
    #[error("Invalid time scale: {0}")]
    InvalidTimeScale(f32),
}

/// Result alias for preview operations
pub type PreviewResult<T> = Result<T, PreviewError>;
