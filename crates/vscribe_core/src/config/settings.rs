//! The settings tree.
//!
//! One struct per TOML table, every field defaulted, so a missing or
//! partial config file still produces a runnable configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;
use crate::models::DeviceRequest;

/// All configuration, grouped by concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Where outputs and scratch files go.
    #[serde(default)]
    pub paths: PathSettings,

    /// Audio extraction settings.
    #[serde(default)]
    pub extraction: ExtractionSettings,

    /// Speech recognition settings.
    #[serde(default)]
    pub transcription: TranscriptionSettings,

    /// Diagnostic output settings.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Output and scratch directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Output folder for generated documents. Unset means "next to the
    /// input videos".
    #[serde(default)]
    pub output_folder: Option<PathBuf>,

    /// Root folder for temporary waveform files.
    #[serde(default = "default_temp_root")]
    pub temp_root: PathBuf,
}

fn default_temp_root() -> PathBuf {
    std::env::temp_dir().join("videoscribe")
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            output_folder: None,
            temp_root: default_temp_root(),
        }
    }
}

/// Audio extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionSettings {
    /// Media tool executable (name on PATH or an absolute path).
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Timeout for a single tool invocation, in seconds. Zero disables
    /// the timeout.
    #[serde(default)]
    pub tool_timeout_secs: u64,
}

fn default_tool() -> String {
    "ffmpeg".to_string()
}

impl ExtractionSettings {
    /// Timeout as a `Duration`, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        match self.tool_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            tool_timeout_secs: 0,
        }
    }
}

/// Speech recognition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionSettings {
    /// Path to the model file (GGML/GGUF format).
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Spoken language hint ("auto" lets the model detect it).
    #[serde(default = "default_language")]
    pub language: String,

    /// Compute device request.
    #[serde(default)]
    pub device: DeviceRequest,

    /// Longest span of audio decoded in one pass, in seconds.
    #[serde(default = "default_max_segment_secs")]
    pub max_segment_secs: u32,

    /// Decoder threads. Zero derives a count from available parallelism.
    #[serde(default)]
    pub threads: u32,
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models/ggml-base.bin")
}

fn default_language() -> String {
    "auto".to_string()
}

fn default_max_segment_secs() -> u32 {
    30
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            language: default_language(),
            device: DeviceRequest::default(),
            max_segment_secs: default_max_segment_secs(),
            threads: 0,
        }
    }
}

/// Diagnostic output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default log level (overridable via RUST_LOG).
    #[serde(default)]
    pub level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_serialize_to_all_sections() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert!(toml.contains("[paths]"));
        assert!(toml.contains("[transcription]"));
        assert!(toml.contains("temp_root"));
    }

    #[test]
    fn serialized_defaults_parse_back() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.paths.temp_root, settings.paths.temp_root);
        assert_eq!(parsed.transcription.language, "auto");
        assert_eq!(parsed.transcription.device, DeviceRequest::Auto);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let minimal = "[transcription]\nmodel_path = \"custom/model.bin\"";
        let parsed: Settings = toml::from_str(minimal).unwrap();
        assert_eq!(
            parsed.transcription.model_path,
            PathBuf::from("custom/model.bin")
        );
        assert_eq!(parsed.transcription.max_segment_secs, 30);
        assert_eq!(parsed.extraction.tool, "ffmpeg");
        assert!(parsed.paths.output_folder.is_none());
    }

    #[test]
    fn zero_timeout_means_none() {
        let settings = ExtractionSettings::default();
        assert!(settings.timeout().is_none());

        let parsed: Settings = toml::from_str("[extraction]\ntool_timeout_secs = 90").unwrap();
        assert_eq!(
            parsed.extraction.timeout(),
            Some(Duration::from_secs(90))
        );
    }
}
