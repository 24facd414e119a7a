//! Types for audio extraction operations.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for audio extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Source video disappeared between discovery and extraction.
    #[error("Video file not found: {0}")]
    InputNotFound(PathBuf),

    /// The media tool executable could not be located.
    #[error("{tool} not found. Install it and make sure it is on PATH.")]
    ToolNotFound { tool: String },

    /// The media tool ran and reported failure.
    #[error("{tool} exited with status {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// The media tool exceeded the configured timeout and was killed.
    #[error("{tool} did not finish within {secs}s and was killed")]
    TimedOut { tool: String, secs: u64 },

    /// The tool exited cleanly but produced no usable waveform.
    #[error("Extracted waveform missing or empty: {0}")]
    OutputMissing(PathBuf),

    /// File I/O error.
    #[error("I/O failure during {operation}: {source}")]
    IoError {
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl ExtractionError {
    /// Record a non-zero tool exit.
    pub fn command_failed(
        tool: impl Into<String>,
        exit_code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }

    /// Wrap an I/O fault, naming the operation that hit it.
    pub fn io_error(operation: impl Into<String>, source: io::Error) -> Self {
        Self::IoError {
            operation: operation.into(),
            source,
        }
    }
}

/// Produces the waveform file the speech engine consumes.
///
/// Implementations must overwrite any existing file at the target path
/// and leave a mono 16 kHz 16-bit PCM WAV behind on success.
pub trait AudioExtractor: Send + Sync {
    /// Extract `video`'s audio track into `wav`.
    fn extract(&self, video: &Path, wav: &Path) -> Result<(), ExtractionError>;
}
