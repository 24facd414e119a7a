//! Types for speech recognition operations.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for the speech engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The model could not be loaded. Fatal for the whole batch.
    #[error("Failed to load speech model: {message}")]
    ModelLoad { message: String },

    /// The waveform file could not be opened or read.
    #[error("Failed to read waveform {path}: {message}")]
    AudioRead { path: PathBuf, message: String },

    /// The waveform is not in the format the engine expects.
    #[error("Unsupported waveform format in {path}: {detail}")]
    AudioFormat { path: PathBuf, detail: String },

    /// Recognition itself failed.
    #[error("Speech decoding failed: {message}")]
    Decode { message: String },
}

impl EngineError {
    /// Create a model load error.
    pub fn model_load(message: impl Into<String>) -> Self {
        Self::ModelLoad {
            message: message.into(),
        }
    }

    /// Create an audio read error.
    pub fn audio_read(path: &Path, message: impl Into<String>) -> Self {
        Self::AudioRead {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// Create an audio format error.
    pub fn audio_format(path: &Path, detail: impl Into<String>) -> Self {
        Self::AudioFormat {
            path: path.to_path_buf(),
            detail: detail.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}
