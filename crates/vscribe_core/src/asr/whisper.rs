//! Speech recognition on whisper.cpp via `whisper-rs`.
//!
//! One [`WhisperEngine`] holds the loaded model for the whole batch.
//! Each call reads a waveform file, decodes it in fixed-size windows,
//! and joins the recognized segments into a single transcript string.

use std::path::Path;
use std::time::Instant;

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::config::TranscriptionSettings;
use crate::extraction::WAV_SAMPLE_RATE;

use super::types::EngineError;
use super::SpeechEngine;

/// Shortest window handed to the decoder (one second of audio).
const MIN_DECODE_SAMPLES: usize = WAV_SAMPLE_RATE as usize;

/// `SpeechEngine` backed by a whisper.cpp model.
pub struct WhisperEngine {
    ctx: WhisperContext,
    language: String,
    threads: i32,
    window_samples: usize,
}

impl WhisperEngine {
    /// Load the model named in the settings.
    ///
    /// This is the expensive call of the batch; it happens once and the
    /// engine is reused read-only for every file.
    pub fn new(settings: &TranscriptionSettings) -> Result<Self, EngineError> {
        let model_path = &settings.model_path;
        if !model_path.exists() {
            return Err(EngineError::model_load(format!(
                "model file not found: {} (download a ggml model and point transcription.model_path at it)",
                model_path.display()
            )));
        }
        let path_str = model_path
            .to_str()
            .ok_or_else(|| EngineError::model_load("model path is not valid UTF-8"))?;

        tracing::info!(
            "Loading speech model from {} (device: {})",
            model_path.display(),
            settings.device
        );

        let mut ctx_params = WhisperContextParameters::default();
        ctx_params.use_gpu = settings.device.wants_gpu();

        let ctx = WhisperContext::new_with_params(path_str, ctx_params)
            .map_err(|e| EngineError::model_load(e.to_string()))?;

        tracing::info!("Speech model loaded");

        Ok(Self {
            ctx,
            language: settings.language.clone(),
            threads: resolve_threads(settings.threads),
            window_samples: window_samples(settings.max_segment_secs),
        })
    }
}

impl SpeechEngine for WhisperEngine {
    fn transcribe(&self, wav: &Path) -> Result<String, EngineError> {
        let started = Instant::now();
        let samples = read_wav_samples(wav)?;
        if samples.is_empty() {
            tracing::warn!("Waveform {} holds no samples", wav.display());
            return Ok(String::new());
        }

        let mut pieces: Vec<String> = Vec::new();
        for chunk in samples.chunks(self.window_samples) {
            let window = pad_to_min(chunk.to_vec(), MIN_DECODE_SAMPLES);

            // Fresh state per call keeps decode context from leaking
            // between files and between windows.
            let mut state = self
                .ctx
                .create_state()
                .map_err(|e| EngineError::decode(e.to_string()))?;

            let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
            params.set_n_threads(self.threads);
            params.set_translate(false);
            params.set_language(Some(self.language.as_str()));
            params.set_print_special(false);
            params.set_print_progress(false);
            params.set_print_realtime(false);
            params.set_print_timestamps(false);
            params.set_suppress_blank(true);
            params.set_no_context(true);

            state
                .full(params, &window)
                .map_err(|e| EngineError::decode(e.to_string()))?;

            let segments = state
                .full_n_segments()
                .map_err(|e| EngineError::decode(e.to_string()))?;
            for i in 0..segments {
                let text = state
                    .full_get_segment_text(i)
                    .map_err(|e| EngineError::decode(e.to_string()))?;
                let text = text.trim();
                if !text.is_empty() {
                    pieces.push(text.to_string());
                }
            }
        }

        let transcript = pieces.join(" ");
        tracing::info!(
            "Transcribed {} in {:.1}s ({} chars)",
            wav.display(),
            started.elapsed().as_secs_f64(),
            transcript.len()
        );

        Ok(transcript)
    }
}

/// Read a mono 16 kHz 16-bit PCM WAV into normalized f32 samples.
fn read_wav_samples(path: &Path) -> Result<Vec<f32>, EngineError> {
    let mut reader =
        hound::WavReader::open(path).map_err(|e| EngineError::audio_read(path, e.to_string()))?;

    let spec = reader.spec();
    if spec.channels != 1
        || spec.sample_rate != WAV_SAMPLE_RATE
        || spec.bits_per_sample != 16
        || spec.sample_format != hound::SampleFormat::Int
    {
        return Err(EngineError::audio_format(
            path,
            format!(
                "expected mono {} Hz 16-bit PCM, got {} channel(s) {} Hz {}-bit",
                WAV_SAMPLE_RATE, spec.channels, spec.sample_rate, spec.bits_per_sample
            ),
        ));
    }

    let mut samples = Vec::with_capacity(reader.len() as usize);
    for sample in reader.samples::<i16>() {
        let sample = sample.map_err(|e| EngineError::audio_read(path, e.to_string()))?;
        samples.push(sample as f32 / i16::MAX as f32);
    }
    Ok(samples)
}

/// Window length in samples for a cap given in seconds.
fn window_samples(max_segment_secs: u32) -> usize {
    let secs = max_segment_secs.max(1) as usize;
    secs * WAV_SAMPLE_RATE as usize
}

/// Zero-pad a window up to the decoder's minimum length.
fn pad_to_min(mut window: Vec<f32>, min_len: usize) -> Vec<f32> {
    if window.len() < min_len {
        window.resize(min_len, 0.0);
    }
    window
}

/// Thread count for decoding: configured value, or the whisper.cpp
/// default of min(4, cores) when zero.
fn resolve_threads(configured: u32) -> i32 {
    if configured > 0 {
        return configured as i32;
    }
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);
    cores.min(4) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write_wav(path: &Path, sample_rate: u32, samples: &[i16]) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn reads_mono_16k_wav() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, WAV_SAMPLE_RATE, &[0, i16::MAX, i16::MIN + 1, 0]);

        let samples = read_wav_samples(&path).unwrap();
        assert_eq!(samples.len(), 4);
        assert!((samples[1] - 1.0).abs() < 1e-6);
        assert!((samples[2] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_wrong_sample_rate() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("slow.wav");
        write_wav(&path, 8000, &[0; 100]);

        let result = read_wav_samples(&path);
        assert!(matches!(result, Err(EngineError::AudioFormat { .. })));
    }

    #[test]
    fn rejects_non_wav_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.wav");
        std::fs::write(&path, b"definitely not RIFF").unwrap();

        let result = read_wav_samples(&path);
        assert!(matches!(result, Err(EngineError::AudioRead { .. })));
    }

    #[test]
    fn pads_short_windows_only() {
        let padded = pad_to_min(vec![0.5; 10], 100);
        assert_eq!(padded.len(), 100);
        assert_eq!(padded[9], 0.5);
        assert_eq!(padded[10], 0.0);

        let untouched = pad_to_min(vec![0.5; 200], 100);
        assert_eq!(untouched.len(), 200);
    }

    #[test]
    fn window_length_honors_cap_and_floor() {
        assert_eq!(window_samples(30), 30 * WAV_SAMPLE_RATE as usize);
        // A zero cap falls back to one second rather than panicking.
        assert_eq!(window_samples(0), WAV_SAMPLE_RATE as usize);
    }

    #[test]
    fn thread_count_is_positive() {
        assert!(resolve_threads(0) >= 1);
        assert_eq!(resolve_threads(8), 8);
    }

    #[test]
    fn new_rejects_missing_model() {
        let settings = TranscriptionSettings {
            model_path: PathBuf::from("/nonexistent/model.bin"),
            ..TranscriptionSettings::default()
        };
        let result = WhisperEngine::new(&settings);
        assert!(matches!(result, Err(EngineError::ModelLoad { .. })));
    }
}
