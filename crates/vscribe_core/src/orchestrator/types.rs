//! Core types for the batch orchestrator.

use std::io;
use std::path::PathBuf;

use serde::Serialize;

use crate::asr::EngineError;
use crate::discovery::DiscoveryError;

/// Progress callback type for reporting batch progress.
pub type ProgressCallback = Box<dyn Fn(&ProgressEvent) + Send + Sync>;

/// Progress notifications emitted while a batch runs.
///
/// Events arrive strictly in batch order: one `Discovered`, then (if any
/// videos were found) one `EngineReady`, then per item one `ItemStarted`
/// followed by either `ItemSkipped` or `ItemWritten`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Discovery finished; `count` video files queued.
    Discovered { count: usize },
    /// The speech engine loaded successfully.
    EngineReady,
    /// Processing of one video began (`index` is 1-based).
    ItemStarted {
        index: usize,
        total: usize,
        file_name: String,
    },
    /// One video was skipped; the batch continues.
    ItemSkipped { file_name: String, reason: String },
    /// One document was written successfully.
    ItemWritten {
        file_name: String,
        document: PathBuf,
    },
}

/// Outcome of processing a single video file.
#[derive(Debug, Clone, Serialize)]
pub struct ItemResult {
    /// Video file name that was processed.
    pub file_name: String,
    /// Whether a document was written for this video.
    pub success: bool,
    /// Path to the written document (if successful).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<PathBuf>,
    /// Error message (if skipped).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ItemResult {
    /// Record a written document.
    pub fn success(file_name: impl Into<String>, document: PathBuf) -> Self {
        Self {
            file_name: file_name.into(),
            success: true,
            document: Some(document),
            error: None,
        }
    }

    /// Create a skipped result.
    pub fn failure(file_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            success: false,
            document: None,
            error: Some(error.into()),
        }
    }
}

/// Accumulated outcome of a whole batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Per-video results, in processing order.
    pub items: Vec<ItemResult>,
    /// Directory the documents were written to.
    pub output_dir: PathBuf,
}

impl BatchReport {
    /// Number of videos processed (including skips).
    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// Number of videos that produced a document.
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|item| item.success).count()
    }
}

/// Fatal batch errors. Per-item failures are recorded in the report
/// instead and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// The input directory could not be read.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// The speech engine could not be constructed.
    #[error("Engine construction failed: {0}")]
    EngineInit(#[from] EngineError),

    /// A working directory could not be created.
    #[error("I/O failure during {operation}: {source}")]
    IoError {
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl BatchError {
    /// Wrap an I/O fault, naming the operation that hit it.
    pub fn io_error(operation: impl Into<String>, source: io::Error) -> Self {
        Self::IoError {
            operation: operation.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_result_success() {
        let result = ItemResult::success("talk.mp4", PathBuf::from("/out/talk.md"));
        assert!(result.success);
        assert_eq!(result.file_name, "talk.mp4");
        assert!(result.document.is_some());
        assert!(result.error.is_none());
    }

    #[test]
    fn item_result_failure() {
        let result = ItemResult::failure("talk.mp4", "extraction failed");
        assert!(!result.success);
        assert!(result.document.is_none());
        assert_eq!(result.error.as_deref(), Some("extraction failed"));
    }

    #[test]
    fn report_counts_successes() {
        let report = BatchReport {
            items: vec![
                ItemResult::success("a.mp4", PathBuf::from("/out/a.md")),
                ItemResult::failure("b.mp4", "empty transcript"),
                ItemResult::success("c.mkv", PathBuf::from("/out/c.md")),
            ],
            output_dir: PathBuf::from("/out"),
        };

        assert_eq!(report.total(), 3);
        assert_eq!(report.succeeded(), 2);
    }

    #[test]
    fn report_serializes_skipping_empty_fields() {
        let report = BatchReport {
            items: vec![ItemResult::failure("b.mp4", "boom")],
            output_dir: PathBuf::from("/out"),
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"file_name\":\"b.mp4\""));
        assert!(json.contains("\"error\":\"boom\""));
        assert!(!json.contains("\"document\""));
    }
}
