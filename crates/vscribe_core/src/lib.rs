//! VideoScribe Core - Backend logic for batch video transcription
//!
//! This crate contains all business logic with zero terminal
//! dependencies. It discovers videos, extracts their audio with ffmpeg,
//! transcribes the audio with whisper.cpp, and writes one Markdown
//! document per video.

pub mod asr;
pub mod config;
pub mod discovery;
pub mod document;
pub mod extraction;
pub mod logging;
pub mod models;
pub mod orchestrator;

/// Crate version string from Cargo metadata.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
