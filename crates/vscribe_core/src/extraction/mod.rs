//! Audio extraction module.
//!
//! Turns a video file into the temporary waveform the speech engine
//! reads. The production path shells out to ffmpeg with a fixed
//! argument set (mono, 16 kHz, 16-bit PCM, overwrite); the
//! [`AudioExtractor`] trait keeps the orchestrator testable without the
//! tool installed.

mod ffmpeg;
mod types;

pub use ffmpeg::{FfmpegExtractor, WAV_CHANNELS, WAV_SAMPLE_RATE};
pub use types::{AudioExtractor, ExtractionError};
