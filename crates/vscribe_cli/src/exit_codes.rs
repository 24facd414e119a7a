//! Exit codes for the CLI.
//!
//! These codes enable scripting integration by providing structured
//! feedback about batch results. Per-video skips do not affect the
//! exit code; only batch-fatal conditions do.

/// Exit codes for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Operation completed successfully (including empty batches)
    Success = 0,
    /// General/unspecified error
    GeneralError = 1,
    /// Invalid command-line arguments
    InvalidArguments = 2,
    /// Input directory does not exist or is not a directory
    InputDirNotFound = 3,
    /// Speech engine failed to load
    EngineInitFailed = 4,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitCode::Success => write!(f, "success"),
            ExitCode::GeneralError => write!(f, "general error"),
            ExitCode::InvalidArguments => write!(f, "invalid arguments"),
            ExitCode::InputDirNotFound => write!(f, "input directory not found"),
            ExitCode::EngineInitFailed => write!(f, "engine initialization failed"),
        }
    }
}
