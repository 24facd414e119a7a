//! Speech recognition module.
//!
//! One engine instance is constructed per batch run and reused
//! read-only for every file. The [`SpeechEngine`] trait is the seam the
//! orchestrator depends on, so tests and alternative backends can stand
//! in for the whisper.cpp implementation.

mod types;
mod whisper;

pub use types::EngineError;
pub use whisper::WhisperEngine;

use std::path::Path;

use crate::config::TranscriptionSettings;

/// A loaded speech recognition model.
pub trait SpeechEngine: Send + Sync {
    /// Transcribe one waveform file (mono, 16 kHz, 16-bit PCM).
    ///
    /// An empty string means the audio produced no usable speech; the
    /// caller treats it the same as an error, minus the diagnostic.
    fn transcribe(&self, wav: &Path) -> Result<String, EngineError>;
}

/// Build the production engine from settings.
pub fn create_engine(
    settings: &TranscriptionSettings,
) -> Result<Box<dyn SpeechEngine>, EngineError> {
    Ok(Box::new(WhisperEngine::new(settings)?))
}
