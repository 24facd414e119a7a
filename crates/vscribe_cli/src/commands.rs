//! CLI command implementations.

use std::path::{Path, PathBuf};

use vscribe_core::asr::create_engine;
use vscribe_core::config::{ConfigManager, Settings};
use vscribe_core::discovery::DiscoveryError;
use vscribe_core::orchestrator::{BatchError, BatchReport, BatchRunner, ProgressEvent};

use crate::colors;
use crate::exit_codes::ExitCode;

/// Arguments for the `run` command.
pub struct RunArgs {
    pub input_folder: PathBuf,
    pub output_folder: Option<PathBuf>,
    pub temp_folder: Option<PathBuf>,
    pub model: Option<PathBuf>,
    pub json: bool,
}

/// Transcribe every video in a folder to Markdown.
pub fn run(mut settings: Settings, args: RunArgs) -> ExitCode {
    // Positional arguments and --model win over the config file
    if let Some(output) = args.output_folder {
        settings.paths.output_folder = Some(output);
    }
    if let Some(temp) = args.temp_folder {
        settings.paths.temp_root = temp;
    }
    if let Some(model) = args.model {
        settings.transcription.model_path = model;
    }
    tracing::debug!(
        "Effective settings: model {}, language {}, device {}",
        settings.transcription.model_path.display(),
        settings.transcription.language,
        settings.transcription.device
    );

    let transcription = settings.transcription.clone();
    let mut runner = BatchRunner::new(settings);
    if !args.json {
        runner = runner.with_progress(Box::new(print_progress));
    }

    match runner.run(&args.input_folder, || create_engine(&transcription)) {
        Ok(report) => {
            if args.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(encoded) => println!("{}", encoded),
                    Err(e) => {
                        eprintln!(
                            "{}",
                            colors::error(&format!("Failed to encode report: {}", e))
                        );
                        return ExitCode::GeneralError;
                    }
                }
            } else {
                print_summary(&report);
            }
            ExitCode::Success
        }
        Err(e) => {
            eprintln!("{}", colors::error(&e.to_string()));
            fatal_exit_code(&e)
        }
    }
}

/// Write a default configuration file, refusing to overwrite.
pub fn init_config(path: &Path) -> ExitCode {
    let mut manager = ConfigManager::new(path);
    match manager.create_default() {
        Ok(()) => {
            println!(
                "Wrote default config to {}",
                colors::path(&path.display().to_string())
            );
            ExitCode::Success
        }
        Err(e) => {
            eprintln!("{}", colors::error(&e.to_string()));
            ExitCode::GeneralError
        }
    }
}

/// Map a fatal batch error to its exit code.
fn fatal_exit_code(error: &BatchError) -> ExitCode {
    match error {
        BatchError::Discovery(DiscoveryError::DirectoryNotFound(_))
        | BatchError::Discovery(DiscoveryError::NotADirectory(_)) => ExitCode::InputDirNotFound,
        BatchError::Discovery(_) => ExitCode::GeneralError,
        BatchError::EngineInit(_) => ExitCode::EngineInitFailed,
        BatchError::IoError { .. } => ExitCode::GeneralError,
    }
}

/// Render one progress event as a stdout line (skips go to stderr).
fn print_progress(event: &ProgressEvent) {
    match event {
        ProgressEvent::Discovered { count: 0 } => {
            println!("{}", colors::dim("No video files found."));
        }
        ProgressEvent::Discovered { count } => {
            println!(
                "{}",
                colors::info(&format!("Found {} video file(s)", count))
            );
        }
        ProgressEvent::EngineReady => {
            println!("{}", colors::dim("Model loaded"));
        }
        ProgressEvent::ItemStarted {
            index,
            total,
            file_name,
        } => {
            println!(
                "{} {}",
                colors::info(&format!("[{}/{}]", index, total)),
                file_name
            );
        }
        ProgressEvent::ItemSkipped { file_name, reason } => {
            eprintln!(
                "{}",
                colors::warning(&format!("skipped {}: {}", file_name, reason))
            );
        }
        ProgressEvent::ItemWritten { document, .. } => {
            println!(
                "  {}",
                colors::dim(&format!("wrote {}", document.display()))
            );
        }
    }
}

/// Print the final human-readable summary.
fn print_summary(report: &BatchReport) {
    let line = format!(
        "Processed {}/{} video file(s)",
        report.succeeded(),
        report.total()
    );
    if report.total() > 0 && report.succeeded() == report.total() {
        println!("{}", colors::success(&line));
    } else {
        println!("{}", line);
    }
    if report.total() > 0 {
        println!(
            "Documents saved in: {}",
            colors::path(&report.output_dir.display().to_string())
        );
    }
}
