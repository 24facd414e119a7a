//! FFmpeg waveform extraction.
//!
//! Converts a video's audio track into the mono 16 kHz 16-bit PCM WAV
//! file the speech engine consumes. The tool is invoked as a subprocess
//! with stderr captured for diagnostics.

use std::ffi::OsString;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};

use crate::config::ExtractionSettings;

use super::types::{AudioExtractor, ExtractionError};

/// Sample rate of extracted waveforms (Hz).
pub const WAV_SAMPLE_RATE: u32 = 16000;

/// Channel count of extracted waveforms.
pub const WAV_CHANNELS: u16 = 1;

/// Poll interval while waiting on the tool with a timeout.
const WAIT_POLL: Duration = Duration::from_millis(50);

/// `AudioExtractor` backed by an ffmpeg subprocess.
pub struct FfmpegExtractor {
    tool: String,
    timeout: Option<Duration>,
}

impl FfmpegExtractor {
    /// Build from extraction settings.
    pub fn new(settings: &ExtractionSettings) -> Self {
        Self {
            tool: settings.tool.clone(),
            timeout: settings.timeout(),
        }
    }
}

impl Default for FfmpegExtractor {
    fn default() -> Self {
        Self::new(&ExtractionSettings::default())
    }
}

impl AudioExtractor for FfmpegExtractor {
    fn extract(&self, video: &Path, wav: &Path) -> Result<(), ExtractionError> {
        if !video.exists() {
            return Err(ExtractionError::InputNotFound(video.to_path_buf()));
        }

        let mut cmd = Command::new(&self.tool);
        cmd.args(build_wav_args(video, wav));
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        tracing::debug!("Running {}: {:?}", self.tool, cmd);

        let child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ExtractionError::ToolNotFound {
                    tool: self.tool.clone(),
                }
            } else {
                ExtractionError::io_error("spawn", e)
            }
        })?;

        let output = wait_with_timeout(child, self.timeout, &self.tool)?;

        if !output.status.success() {
            let message = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ExtractionError::command_failed(
                &self.tool,
                output.status.code().unwrap_or(-1),
                message,
            ));
        }

        verify_waveform(wav)
    }
}

/// Assemble the fixed argument list for WAV extraction.
///
/// Shape: no video stream, signed 16-bit little-endian PCM, 16 kHz,
/// mono, overwrite the target. `-loglevel error` keeps stderr down to
/// actual diagnostics.
fn build_wav_args(video: &Path, wav: &Path) -> Vec<OsString> {
    vec![
        OsString::from("-hide_banner"),
        OsString::from("-loglevel"),
        OsString::from("error"),
        OsString::from("-i"),
        video.as_os_str().to_os_string(),
        OsString::from("-vn"),
        OsString::from("-acodec"),
        OsString::from("pcm_s16le"),
        OsString::from("-ar"),
        OsString::from(WAV_SAMPLE_RATE.to_string()),
        OsString::from("-ac"),
        OsString::from(WAV_CHANNELS.to_string()),
        OsString::from("-y"),
        wav.as_os_str().to_os_string(),
    ]
}

/// Wait for the child, enforcing the timeout when one is configured.
///
/// Captured stderr is drained on a helper thread while we poll, so a
/// child writing more diagnostics than the pipe buffer holds cannot
/// block midway and turn into a spurious timeout. On timeout the child
/// is killed and reaped before the error returns, so no zombie is left
/// behind.
fn wait_with_timeout(
    mut child: Child,
    timeout: Option<Duration>,
    tool: &str,
) -> Result<Output, ExtractionError> {
    let Some(limit) = timeout else {
        return child
            .wait_with_output()
            .map_err(|e| ExtractionError::io_error("wait", e));
    };

    let drain = child.stderr.take().map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    });

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break Some(status),
            Ok(None) => {
                if start.elapsed() >= limit {
                    let _ = child.kill();
                    let _ = child.wait();
                    break None;
                }
                std::thread::sleep(WAIT_POLL);
            }
            Err(e) => return Err(ExtractionError::io_error("wait", e)),
        }
    };

    // The child is gone either way, so the pipe is closed and the
    // drain thread finishes promptly.
    let stderr = match drain {
        Some(handle) => handle.join().unwrap_or_default(),
        None => Vec::new(),
    };

    match status {
        Some(status) => Ok(Output {
            status,
            stdout: Vec::new(),
            stderr,
        }),
        None => Err(ExtractionError::TimedOut {
            tool: tool.to_string(),
            secs: limit.as_secs(),
        }),
    }
}

/// Check that the tool actually produced a non-empty waveform.
fn verify_waveform(wav: &Path) -> Result<(), ExtractionError> {
    match fs::metadata(wav) {
        Ok(meta) if meta.len() > 0 => Ok(()),
        Ok(_) => Err(ExtractionError::OutputMissing(wav.to_path_buf())),
        Err(_) => Err(ExtractionError::OutputMissing(wav.to_path_buf())),
    }
}
