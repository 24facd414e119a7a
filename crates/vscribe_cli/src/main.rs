//! VideoScribe Command-Line Interface
//!
//! Turns a folder of videos into one transcribed Markdown document per
//! video: audio is extracted with ffmpeg, transcribed with whisper.cpp,
//! and written next to the videos (or to a chosen output folder).

mod colors;
mod commands;
mod exit_codes;

use std::path::{Path, PathBuf};

use clap::{error::ErrorKind, Parser, Subcommand};

use vscribe_core::config::{ConfigManager, Settings};
use vscribe_core::logging::{init_tracing, LogLevel};

use commands::RunArgs;
use exit_codes::ExitCode;

const RUN_EXAMPLES: &str = "\
Examples:
  videoscribe run ./videos
  videoscribe run ./videos ./output
  videoscribe run ./videos ./output ./temp
  videoscribe run ./videos --model models/ggml-base.bin";

/// VideoScribe - Batch video transcription to Markdown
#[derive(Parser, Debug)]
#[command(name = "videoscribe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Load settings from a TOML config file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Transcribe every video in a folder
    #[command(after_help = RUN_EXAMPLES)]
    Run {
        /// Folder containing the videos
        input_folder: PathBuf,

        /// Folder for the generated documents (default: the input folder)
        output_folder: Option<PathBuf>,

        /// Folder for temporary audio files (default: system temp)
        temp_folder: Option<PathBuf>,

        /// Model file to load (overrides the configured path)
        #[arg(long, value_name = "FILE")]
        model: Option<PathBuf>,

        /// Print the final report as JSON for scripting
        #[arg(long)]
        json: bool,
    },
    /// Write a default configuration file
    InitConfig {
        /// Where to write the file
        #[arg(default_value = "videoscribe.toml")]
        path: PathBuf,
    },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Missing arguments get the run examples appended; every
            // other parse outcome keeps clap's own exit behavior.
            if err.kind() == ErrorKind::MissingRequiredArgument {
                let _ = err.print();
                eprintln!("\n{RUN_EXAMPLES}");
                std::process::exit(ExitCode::InvalidArguments.as_i32());
            }
            err.exit();
        }
    };
    let exit_code = run(cli);
    std::process::exit(exit_code.as_i32());
}

fn run(cli: Cli) -> ExitCode {
    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(code) => return code,
    };

    let default_level = if cli.verbose {
        LogLevel::Debug
    } else {
        settings.logging.level
    };
    init_tracing(default_level);

    match cli.command {
        Commands::Run {
            input_folder,
            output_folder,
            temp_folder,
            model,
            json,
        } => commands::run(
            settings,
            RunArgs {
                input_folder,
                output_folder,
                temp_folder,
                model,
                json,
            },
        ),
        Commands::InitConfig { path } => commands::init_config(&path),
    }
}

/// Load settings from `--config`, or defaults when no file was named.
fn load_settings(config: Option<&Path>) -> Result<Settings, ExitCode> {
    match config {
        Some(path) => {
            let mut manager = ConfigManager::new(path);
            if let Err(e) = manager.load() {
                eprintln!("{}", colors::error(&e.to_string()));
                return Err(ExitCode::InvalidArguments);
            }
            Ok(manager.into_settings())
        }
        None => Ok(Settings::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    /// Verify the CLI definition is valid
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_run_minimal() {
        let cli = Cli::try_parse_from(["videoscribe", "run", "./videos"]).unwrap();
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
        match cli.command {
            Commands::Run {
                input_folder,
                output_folder,
                temp_folder,
                model,
                json,
            } => {
                assert_eq!(input_folder, PathBuf::from("./videos"));
                assert!(output_folder.is_none());
                assert!(temp_folder.is_none());
                assert!(model.is_none());
                assert!(!json);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn parse_run_all_positionals() {
        let cli = Cli::try_parse_from(["videoscribe", "run", "in", "out", "tmp"]).unwrap();
        match cli.command {
            Commands::Run {
                input_folder,
                output_folder,
                temp_folder,
                ..
            } => {
                assert_eq!(input_folder, PathBuf::from("in"));
                assert_eq!(output_folder, Some(PathBuf::from("out")));
                assert_eq!(temp_folder, Some(PathBuf::from("tmp")));
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn parse_run_with_model_and_json() {
        let cli = Cli::try_parse_from([
            "videoscribe",
            "run",
            "in",
            "--model",
            "models/ggml-small.bin",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Run { model, json, .. } => {
                assert_eq!(model, Some(PathBuf::from("models/ggml-small.bin")));
                assert!(json);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn parse_init_config_default_path() {
        let cli = Cli::try_parse_from(["videoscribe", "init-config"]).unwrap();
        match cli.command {
            Commands::InitConfig { path } => {
                assert_eq!(path, PathBuf::from("videoscribe.toml"));
            }
            _ => panic!("Expected InitConfig command"),
        }
    }

    #[test]
    fn parse_init_config_custom_path() {
        let cli = Cli::try_parse_from(["videoscribe", "init-config", "/etc/vs.toml"]).unwrap();
        match cli.command {
            Commands::InitConfig { path } => {
                assert_eq!(path, PathBuf::from("/etc/vs.toml"));
            }
            _ => panic!("Expected InitConfig command"),
        }
    }

    /// Global flags work before and after the subcommand
    #[test]
    fn parse_global_flags_any_position() {
        let cli =
            Cli::try_parse_from(["videoscribe", "--config", "vs.toml", "run", "in"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("vs.toml")));

        let cli = Cli::try_parse_from(["videoscribe", "run", "in", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    /// A bare `run` is the case main() appends the examples for.
    #[test]
    fn parse_missing_input_fails() {
        let err = Cli::try_parse_from(["videoscribe", "run"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn parse_invalid_command_fails() {
        assert!(Cli::try_parse_from(["videoscribe", "transcode"]).is_err());
    }

    #[test]
    fn load_settings_missing_config_is_invalid_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        let result = load_settings(Some(&missing));
        assert_eq!(result.unwrap_err(), ExitCode::InvalidArguments);
    }

    #[test]
    fn load_settings_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vs.toml");
        std::fs::write(&path, "[transcription]\nlanguage = \"en\"\n").unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.transcription.language, "en");
    }

    #[test]
    fn load_settings_defaults_without_config() {
        let settings = load_settings(None).unwrap();
        assert_eq!(settings.extraction.tool, "ffmpeg");
    }
}
