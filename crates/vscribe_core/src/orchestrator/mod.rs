//! Batch orchestrator for processing a directory of videos.
//!
//! This module coordinates the per-video pipeline and the batch-level
//! bookkeeping around it. Each video moves through a fixed sequence;
//! a failure at any stage skips that video and the batch continues.
//!
//! # Architecture
//!
//! ```text
//! BatchRunner
//!     ├── discover videos (sorted, non-recursive)
//!     ├── construct engine (once, only when videos exist)
//!     └── per video: extract audio → transcribe → write document
//!                    └── TempWav guard removes the waveform
//! ```
//!
//! # Example
//!
//! ```ignore
//! use vscribe_core::asr::create_engine;
//! use vscribe_core::orchestrator::BatchRunner;
//!
//! let runner = BatchRunner::new(settings.clone());
//! let report = runner.run(input_dir, || create_engine(&settings.transcription))?;
//! println!("Processed {}/{}", report.succeeded(), report.total());
//! ```

mod batch;
mod temp;
mod types;

pub use batch::BatchRunner;
pub use temp::TempWav;
pub use types::{BatchError, BatchReport, ItemResult, ProgressCallback, ProgressEvent};
