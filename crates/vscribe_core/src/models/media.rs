//! Media-related data structures (discovered video files).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A video file discovered in the input directory.
///
/// Read-only for the whole batch: discovered once, never mutated, never
/// deleted. Derived artifact names (waveform, document) come from the
/// stem so re-runs land on the same paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoFile {
    /// Path as discovered (input directory joined with the file name).
    pub path: PathBuf,
    /// Full file name including extension (e.g., "talk.mp4").
    pub file_name: String,
    /// File name without the final extension (e.g., "talk").
    pub stem: String,
}

impl VideoFile {
    /// Build from a path, returning `None` when the file name or stem is
    /// not valid UTF-8.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let file_name = path.file_name()?.to_str()?.to_string();
        let stem = path.file_stem()?.to_str()?.to_string();
        Some(Self {
            path,
            file_name,
            stem,
        })
    }

    /// Deterministic temporary waveform path for this video.
    pub fn wav_path(&self, temp_dir: &Path) -> PathBuf {
        temp_dir.join(format!("{}.wav", self.stem))
    }

    /// Deterministic output document path for this video.
    pub fn document_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}.md", self.stem))
    }
}
