//! Loads and saves the settings file.
//!
//! The file is optional: a missing config means default settings, and
//! partial files are filled in from defaults field by field. Saves go
//! through a temp file plus rename so a crash mid-write cannot leave a
//! truncated config behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::settings::Settings;

/// Faults while reading or writing the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not access config file: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("No config file at: {0}")]
    NotFound(PathBuf),

    #[error("Refusing to overwrite existing config: {0}")]
    AlreadyExists(PathBuf),
}

/// Shorthand for config fallible returns.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Owns the settings file path and the settings currently in memory.
pub struct ConfigManager {
    path: PathBuf,
    settings: Settings,
}

impl ConfigManager {
    /// Point the manager at a settings file without touching the disk.
    ///
    /// Call `load()` or `load_or_create()` to actually read it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            settings: Settings::default(),
        }
    }

    /// The settings file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current in-memory settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable access to the in-memory settings.
    ///
    /// Changes reach the disk only on `save()`.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Consume the manager, keeping only the settings.
    pub fn into_settings(self) -> Settings {
        self.settings
    }

    /// Read the settings file, failing if it does not exist.
    pub fn load(&mut self) -> ConfigResult<()> {
        if !self.path.exists() {
            return Err(ConfigError::NotFound(self.path.clone()));
        }
        let raw = fs::read_to_string(&self.path)?;
        self.settings = toml::from_str(&raw)?;
        Ok(())
    }

    /// Read the settings file, writing a default one first if absent.
    pub fn load_or_create(&mut self) -> ConfigResult<()> {
        if self.path.exists() {
            self.load()
        } else {
            self.settings = Settings::default();
            self.save()
        }
    }

    /// Write a default settings file, refusing to clobber an existing one.
    pub fn create_default(&mut self) -> ConfigResult<()> {
        if self.path.exists() {
            return Err(ConfigError::AlreadyExists(self.path.clone()));
        }
        self.settings = Settings::default();
        self.save()
    }

    /// Persist the in-memory settings atomically.
    pub fn save(&self) -> ConfigResult<()> {
        let rendered = self.render_with_comments()?;
        self.atomic_write(&rendered)?;
        Ok(())
    }

    /// Serialize each section under a commented header.
    fn render_with_comments(&self) -> ConfigResult<String> {
        let sections = [
            (
                "# Output and temporary directories",
                "[paths]",
                toml::to_string_pretty(&self.settings.paths)?,
            ),
            (
                "# Audio extraction (ffmpeg)",
                "[extraction]",
                toml::to_string_pretty(&self.settings.extraction)?,
            ),
            (
                "# Speech recognition",
                "[transcription]",
                toml::to_string_pretty(&self.settings.transcription)?,
            ),
            (
                "# Logging",
                "[logging]",
                toml::to_string_pretty(&self.settings.logging)?,
            ),
        ];

        let mut out = String::from(
            "# videoscribe configuration\n\
             # Every key is optional; omitted keys use the built-in defaults.\n",
        );
        for (comment, header, body) in sections {
            out.push('\n');
            out.push_str(comment);
            out.push('\n');
            out.push_str(header);
            out.push('\n');
            out.push_str(&body);
        }
        Ok(out)
    }

    /// Write through `<path>.tmp` then rename over the target.
    fn atomic_write(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // The temp file sits next to the target so the rename stays on
        // one filesystem.
        let staging = self.path.with_extension("toml.tmp");
        {
            let mut file = fs::File::create(&staging)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&staging, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_or_create_creates_default() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(".config").join("videoscribe.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        assert!(config_path.exists());
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[paths]"));
        assert!(content.contains("[transcription]"));
    }

    #[test]
    fn load_or_create_preserves_existing() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("videoscribe.toml");
        fs::write(&config_path, "[transcription]\nlanguage = \"en\"\n").unwrap();

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        assert_eq!(manager.settings().transcription.language, "en");
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let mut manager = ConfigManager::new(dir.path().join("absent.toml"));
        assert!(matches!(manager.load(), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn create_default_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("videoscribe.toml");
        fs::write(&config_path, "[paths]\n").unwrap();

        let mut manager = ConfigManager::new(&config_path);
        assert!(matches!(
            manager.create_default(),
            Err(ConfigError::AlreadyExists(_))
        ));
    }

    #[test]
    fn atomic_write_leaves_no_temp_on_success() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("videoscribe.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        let staging = config_path.with_extension("toml.tmp");
        assert!(!staging.exists());
    }

    #[test]
    fn saved_config_parses_back() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("videoscribe.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.settings_mut().extraction.tool_timeout_secs = 120;
        manager.save().unwrap();

        let mut reloaded = ConfigManager::new(&config_path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.settings().extraction.tool_timeout_secs, 120);
    }
}
