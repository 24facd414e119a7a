//! Configuration management for videoscribe.
//!
//! Settings live in a TOML file split into one table per concern. Every
//! field is defaulted, so the tool runs with no file at all, and saves
//! are staged through a temp file so a crash cannot truncate the config.
//!
//! # Example
//!
//! ```no_run
//! use vscribe_core::config::ConfigManager;
//!
//! let mut config = ConfigManager::new(".config/videoscribe.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Temp root: {}", config.settings().paths.temp_root.display());
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ExtractionSettings, LoggingSettings, PathSettings, Settings, TranscriptionSettings,
};
