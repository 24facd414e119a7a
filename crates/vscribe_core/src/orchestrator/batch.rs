//! Sequential batch runner.
//!
//! Drives every discovered video through extract, transcribe, and write.
//! Item failures are recorded and skipped; only a missing input
//! directory, a directory creation failure, or a failed engine
//! construction aborts the batch.

use std::fs;
use std::path::{Path, PathBuf};

use crate::asr::{EngineError, SpeechEngine};
use crate::config::Settings;
use crate::discovery::{find_videos, VIDEO_EXTENSIONS};
use crate::document;
use crate::extraction::{AudioExtractor, FfmpegExtractor};
use crate::models::VideoFile;

use super::temp::TempWav;
use super::types::{BatchError, BatchReport, ItemResult, ProgressCallback, ProgressEvent};

/// Runs one input directory through the full pipeline.
///
/// The runner holds the settings and the extraction backend; the speech
/// engine is supplied per run through a factory so that it is only
/// constructed once videos are actually queued.
///
/// # Example
///
/// ```ignore
/// use vscribe_core::asr::create_engine;
/// use vscribe_core::orchestrator::BatchRunner;
///
/// let runner = BatchRunner::new(settings.clone());
/// let report = runner.run(input_dir, || create_engine(&settings.transcription))?;
/// println!("{}/{} done", report.succeeded(), report.total());
/// ```
pub struct BatchRunner {
    settings: Settings,
    extractor: Box<dyn AudioExtractor>,
    progress_callback: Option<ProgressCallback>,
}

impl BatchRunner {
    /// Create a runner with the default ffmpeg extraction backend.
    pub fn new(settings: Settings) -> Self {
        let extractor = Box::new(FfmpegExtractor::new(&settings.extraction));
        Self {
            settings,
            extractor,
            progress_callback: None,
        }
    }

    /// Attach a progress callback.
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Replace the audio extraction backend.
    pub fn with_extractor(mut self, extractor: Box<dyn AudioExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Process every video file in `input_dir`, in name order.
    ///
    /// `make_engine` is invoked exactly once, after discovery has found
    /// at least one video. An empty directory completes normally with an
    /// empty report.
    pub fn run<F>(&self, input_dir: &Path, make_engine: F) -> Result<BatchReport, BatchError>
    where
        F: FnOnce() -> Result<Box<dyn SpeechEngine>, EngineError>,
    {
        let videos = find_videos(input_dir)?;

        let output_dir = self.resolve_output_dir(input_dir);
        let temp_dir = self.settings.paths.temp_root.clone();
        create_dir(&output_dir, "output")?;
        create_dir(&temp_dir, "temp")?;

        self.report_progress(&ProgressEvent::Discovered {
            count: videos.len(),
        });

        if videos.is_empty() {
            tracing::info!("No video files found in {}", input_dir.display());
            tracing::info!("Supported formats: {}", VIDEO_EXTENSIONS.join(", "));
            return Ok(BatchReport {
                items: Vec::new(),
                output_dir,
            });
        }

        tracing::info!("Found {} video file(s)", videos.len());

        let engine = make_engine()?;
        self.report_progress(&ProgressEvent::EngineReady);

        let total = videos.len();
        let mut items = Vec::with_capacity(total);

        for (idx, video) in videos.iter().enumerate() {
            let index = idx + 1;
            tracing::info!("[{}/{}] Processing: {}", index, total, video.file_name);
            self.report_progress(&ProgressEvent::ItemStarted {
                index,
                total,
                file_name: video.file_name.clone(),
            });

            let result = self.process_one(video, engine.as_ref(), &temp_dir, &output_dir);
            if result.success {
                if let Some(ref doc) = result.document {
                    self.report_progress(&ProgressEvent::ItemWritten {
                        file_name: result.file_name.clone(),
                        document: doc.clone(),
                    });
                }
            } else {
                self.report_progress(&ProgressEvent::ItemSkipped {
                    file_name: result.file_name.clone(),
                    reason: result.error.clone().unwrap_or_default(),
                });
            }
            items.push(result);
        }

        let report = BatchReport { items, output_dir };
        tracing::info!(
            "Done! Processed {}/{} video file(s)",
            report.succeeded(),
            report.total()
        );
        tracing::info!("Documents saved in: {}", report.output_dir.display());
        Ok(report)
    }

    /// Run one video through extract, transcribe, and write.
    ///
    /// The waveform guard covers every exit path, so the temporary audio
    /// never outlives the iteration.
    fn process_one(
        &self,
        video: &VideoFile,
        engine: &dyn SpeechEngine,
        temp_dir: &Path,
        output_dir: &Path,
    ) -> ItemResult {
        let wav_path = video.wav_path(temp_dir);
        let _guard = TempWav::new(&wav_path);

        if let Err(e) = self.extractor.extract(&video.path, &wav_path) {
            tracing::warn!("Skipping {}: {}", video.file_name, e);
            return ItemResult::failure(&video.file_name, e.to_string());
        }

        let transcript = match engine.transcribe(&wav_path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", video.file_name, e);
                return ItemResult::failure(&video.file_name, e.to_string());
            }
        };
        if transcript.is_empty() {
            tracing::warn!("Skipping {}: transcript is empty", video.file_name);
            return ItemResult::failure(&video.file_name, "transcript is empty");
        }

        // Absolute source path when resolvable, the discovered path otherwise.
        let source_path = video
            .path
            .canonicalize()
            .unwrap_or_else(|_| video.path.clone());
        let document_path = video.document_path(output_dir);

        if let Err(e) = document::write_markdown(
            &document_path,
            &video.file_name,
            &source_path.display().to_string(),
            &transcript,
        ) {
            tracing::warn!("Skipping {}: {}", video.file_name, e);
            return ItemResult::failure(&video.file_name, e.to_string());
        }

        tracing::info!("Generated: {}", document_path.display());
        ItemResult::success(&video.file_name, document_path)
    }

    fn report_progress(&self, event: &ProgressEvent) {
        if let Some(ref callback) = self.progress_callback {
            callback(event);
        }
    }

    fn resolve_output_dir(&self, input_dir: &Path) -> PathBuf {
        match &self.settings.paths.output_folder {
            Some(dir) => dir.clone(),
            None => input_dir.to_path_buf(),
        }
    }
}

fn create_dir(dir: &Path, label: &str) -> Result<(), BatchError> {
    fs::create_dir_all(dir).map_err(|e| {
        BatchError::io_error(
            format!("creating {} directory '{}'", label, dir.display()),
            e,
        )
    })
}
