//! Scoped cleanup for temporary waveform files.

use std::fs;
use std::path::{Path, PathBuf};

/// RAII guard that removes a temporary waveform file when dropped.
///
/// The guard is created before extraction, so the file is cleaned up on
/// every exit from an item: success, skip, or panic. Only a hard kill
/// of the process leaves the file behind.
pub struct TempWav {
    path: PathBuf,
}

impl TempWav {
    /// Guard the given path. The file does not have to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the guarded waveform file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempWav {
    fn drop(&mut self) {
        if self.path.exists() {
            if let Err(e) = fs::remove_file(&self.path) {
                tracing::warn!(
                    "Failed to clean up temp audio '{}': {}",
                    self.path.display(),
                    e
                );
            } else {
                tracing::debug!("Removed temp audio: {}", self.path.display());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn drop_removes_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        std::fs::write(&path, b"RIFF").unwrap();

        {
            let _guard = TempWav::new(&path);
            assert!(path.exists());
        }

        assert!(!path.exists());
    }

    #[test]
    fn drop_tolerates_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("never_created.wav");

        {
            let _guard = TempWav::new(&path);
        }

        assert!(!path.exists());
    }

    #[test]
    fn guard_exposes_path() {
        let guard = TempWav::new("/tmp/x.wav");
        assert_eq!(guard.path(), Path::new("/tmp/x.wav"));
    }
}
