//! Video discovery from the input directory.
//!
//! Scans one directory (no recursion) for files with a known video
//! container extension and returns them sorted by file name, so batch
//! runs are deterministic.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::VideoFile;

/// Extensions recognized as video containers (matched case-insensitively).
pub const VIDEO_EXTENSIONS: [&str; 8] = [
    "mp4", "avi", "mov", "mkv", "flv", "wmv", "webm", "m4v",
];

/// Error type for discovery operations.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Input directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Input path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Whether a path carries a recognized video extension.
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let lower = ext.to_ascii_lowercase();
            VIDEO_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}

/// Find all video files directly inside `input_dir`.
///
/// Subdirectories are not entered. Entries whose names are not valid
/// UTF-8 are skipped with a warning. Results are sorted by file name.
///
/// # Arguments
///
/// * `input_dir` - Directory to scan
///
/// # Returns
///
/// Sorted list of discovered videos; empty when nothing matches.
pub fn find_videos(input_dir: &Path) -> Result<Vec<VideoFile>, DiscoveryError> {
    if !input_dir.exists() {
        return Err(DiscoveryError::DirectoryNotFound(input_dir.to_path_buf()));
    }
    if !input_dir.is_dir() {
        return Err(DiscoveryError::NotADirectory(input_dir.to_path_buf()));
    }

    let entries = fs::read_dir(input_dir).map_err(|source| DiscoveryError::ReadDir {
        path: input_dir.to_path_buf(),
        source,
    })?;

    let mut videos = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable directory entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() || !is_video_file(&path) {
            continue;
        }

        match VideoFile::from_path(path) {
            Some(video) => videos.push(video),
            None => {
                tracing::warn!(
                    "Skipping file with non-UTF-8 name: {}",
                    entry.path().display()
                );
            }
        }
    }

    videos.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    tracing::debug!(
        "Discovered {} video file(s) in {}",
        videos.len(),
        input_dir.display()
    );

    Ok(videos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    #[test]
    fn finds_supported_extensions_case_insensitively() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "a.mp4");
        touch(dir.path(), "B.MKV");
        touch(dir.path(), "c.WebM");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "noext");

        let videos = find_videos(dir.path()).unwrap();
        let names: Vec<&str> = videos.iter().map(|v| v.file_name.as_str()).collect();
        assert_eq!(names, vec!["B.MKV", "a.mp4", "c.WebM"]);
    }

    #[test]
    fn does_not_recurse_into_subdirectories() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "top.mov");
        let sub = dir.path().join("nested");
        fs::create_dir(&sub).unwrap();
        touch(&sub, "inner.mp4");

        let videos = find_videos(dir.path()).unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].file_name, "top.mov");
    }

    #[test]
    fn directory_named_like_a_video_is_skipped() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("fake.mp4")).unwrap();

        let videos = find_videos(dir.path()).unwrap();
        assert!(videos.is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            find_videos(&missing),
            Err(DiscoveryError::DirectoryNotFound(_))
        ));
    }

    #[test]
    fn file_as_input_is_an_error() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "plain.mp4");
        assert!(matches!(
            find_videos(&dir.path().join("plain.mp4")),
            Err(DiscoveryError::NotADirectory(_))
        ));
    }

    #[test]
    fn empty_directory_yields_empty_list() {
        let dir = tempdir().unwrap();
        assert!(find_videos(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn every_supported_extension_is_recognized() {
        for ext in VIDEO_EXTENSIONS {
            assert!(is_video_file(Path::new(&format!("v.{ext}"))));
            assert!(is_video_file(Path::new(&format!(
                "v.{}",
                ext.to_ascii_uppercase()
            ))));
        }
        assert!(!is_video_file(Path::new("v.txt")));
        assert!(!is_video_file(Path::new("v")));
    }
}
