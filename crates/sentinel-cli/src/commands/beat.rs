//! `beat` commands: coherence beat logging and régime-change checks.
//!
//! Beats accumulate in an append-only JSON-lines file; `beat check` runs
//! the régime-change detector over the recent history from that file.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Serialize;

use sentinel_core::beat::{BeatLog, BeatStatus};
use sentinel_core::config::RegimeConfig;
use sentinel_core::regime::ThreatAssessment;

use super::{print_json, OutputFormat};

/// Default beat log location, relative to the working directory.
const DEFAULT_BEAT_LOG: &str = "sentinel_beats.log";

/// Beat subcommands.
#[derive(Subcommand, Debug)]
pub enum BeatCommands {
    /// Append one intensity reading to the beat log
    Log(LogArgs),
    /// Check the recent beat history for a sharp coherence drop
    Check(CheckArgs),
}

/// Arguments for `beat log`.
#[derive(Args, Debug)]
pub struct LogArgs {
    /// Intensity reading in [0, 1]
    pub intensity: f32,

    /// Free-form context label
    #[arg(long, default_value = "")]
    pub context: String,

    /// Beat log file
    #[arg(long, default_value = DEFAULT_BEAT_LOG)]
    pub log_path: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

/// Arguments for `beat check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Beat log file
    #[arg(long, default_value = DEFAULT_BEAT_LOG)]
    pub log_path: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

/// Response from `beat log`.
#[derive(Debug, Serialize)]
pub struct LogResponse {
    /// The recorded intensity
    pub intensity: f32,
    /// Coherent/fading classification
    pub status: BeatStatus,
}

/// Dispatch a beat subcommand.
pub fn handle_beat_command(command: BeatCommands) -> i32 {
    match command {
        BeatCommands::Log(args) => log_command(args),
        BeatCommands::Check(args) => check_command(args),
    }
}

fn log_command(args: LogArgs) -> i32 {
    let log = BeatLog::new(&args.log_path);
    let record = match log.append(args.intensity, &args.context) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("failed to append beat: {}", e);
            return 1;
        }
    };

    let response = LogResponse {
        intensity: record.intensity,
        status: record.status,
    };

    match args.format {
        OutputFormat::Json => print_json(&response),
        OutputFormat::Human => {
            println!("Beat {:.3} recorded ({:?})", response.intensity, response.status);
        }
    }
    0
}

fn check_command(args: CheckArgs) -> i32 {
    let log = BeatLog::new(&args.log_path);
    let assessment = match log.check_threat(&RegimeConfig::default()) {
        Ok(assessment) => assessment,
        Err(e) => {
            eprintln!("failed to read beat log: {}", e);
            return 1;
        }
    };

    match args.format {
        OutputFormat::Json => print_json(&assessment),
        OutputFormat::Human => match &assessment {
            ThreatAssessment::Unknown { reason } => {
                println!("Threat level: unknown ({})", reason)
            }
            ThreatAssessment::High { reason } => println!("Threat level: HIGH ({})", reason),
            ThreatAssessment::Normal { coherence } => {
                println!("Threat level: normal (coherence {:.3})", coherence)
            }
        },
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn log_then_check_round_trips() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("beats.log");

        for intensity in [0.9, 0.9, 0.9, 0.3, 0.3, 0.3] {
            let args = LogArgs {
                intensity,
                context: "test".to_string(),
                log_path: path.clone(),
                format: OutputFormat::Json,
            };
            assert_eq!(log_command(args), 0);
        }

        let log = BeatLog::new(&path);
        let assessment = log.check_threat(&RegimeConfig::default()).unwrap();
        assert!(assessment.is_high());
    }

    #[test]
    fn check_on_missing_log_reports_unknown() {
        let dir = TempDir::new().expect("temp dir");
        let args = CheckArgs {
            log_path: dir.path().join("absent.log"),
            format: OutputFormat::Json,
        };
        // Missing file degrades to an unknown assessment, not an error
        assert_eq!(check_command(args), 0);
    }
}
