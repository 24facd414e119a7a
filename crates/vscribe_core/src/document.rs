//! Markdown document writer.
//!
//! Renders one transcript into a fixed Markdown layout. Rendering is a
//! pure function and writing is a separate step, so the template stays
//! unit-testable without touching the clock or the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while writing a transcript document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Failed to write the document file.
    #[error("Failed to write document '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl DocumentError {
    /// Record a failed write at `path`.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteError {
            path: path.into(),
            source,
        }
    }
}

/// Render the transcript document as a Markdown string.
///
/// The transcript is embedded verbatim. `generated_at` is the display
/// timestamp, passed in by the caller.
pub fn render_markdown(
    file_name: &str,
    source_path: &str,
    transcript: &str,
    generated_at: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", file_name));

    output.push_str("## Video Information\n\n");
    output.push_str(&format!("- **File name**: {}\n", file_name));
    output.push_str(&format!("- **Source path**: {}\n", source_path));
    output.push_str(&format!("- **Generated**: {}\n\n", generated_at));

    output.push_str("## Transcript\n\n");
    output.push_str(transcript);
    output.push_str("\n\n");

    output.push_str("---\n");
    output.push_str("*Generated automatically by videoscribe*\n");

    output
}

/// Render and write the transcript document, overwriting any existing
/// file. The generation timestamp is the local wall clock at call time.
pub fn write_markdown(
    document_path: &Path,
    file_name: &str,
    source_path: &str,
    transcript: &str,
) -> Result<(), DocumentError> {
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let content = render_markdown(file_name, source_path, transcript, &generated_at);

    fs::write(document_path, content)
        .map_err(|e| DocumentError::write(document_path.to_path_buf(), e))?;

    tracing::debug!("Wrote document: {}", document_path.display());
    Ok(())
}
