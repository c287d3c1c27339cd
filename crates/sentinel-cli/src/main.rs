//! Sentinel CLI
//!
//! Command-line surface for the persona-integrity sentinel.
//!
//! # Commands
//!
//! - `scan`: run a collective scan over a text blob and print the decision
//! - `regenerate`: rebuild one sensor and report what was seeded
//! - `beat log` / `beat check`: record coherence beats and check the
//!   recent history for a régime change
//! - `status`: show the sensor roster
//!
//! JSON goes to stdout for scripted use; logs go to stderr. Exit code 0
//! on success, 1 on error.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

/// Persona-integrity sentinel: scan text, watch coherence, push back.
#[derive(Parser)]
#[command(name = "sentinel")]
#[command(version = "0.1.0")]
#[command(about = "Persona-integrity monitoring: specialized sensors, collective decisions, regime-change checks")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a text blob with every sensor and print the decision
    Scan(commands::scan::ScanArgs),
    /// Regenerate one sensor from the others' collective memory
    Regenerate(commands::regenerate::RegenerateArgs),
    /// Coherence beat logging and régime-change checks
    Beat {
        #[command(subcommand)]
        action: commands::beat::BeatCommands,
    },
    /// Show the sensor roster
    Status(commands::status::StatusArgs),
}

fn main() {
    let cli = Cli::parse();

    // Logging to stderr, keyed off verbosity
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match cli.command {
        Commands::Scan(args) => commands::scan::scan_command(args),
        Commands::Regenerate(args) => commands::regenerate::regenerate_command(args),
        Commands::Beat { action } => commands::beat::handle_beat_command(action),
        Commands::Status(args) => commands::status::status_command(args),
    };

    std::process::exit(exit_code);
}
