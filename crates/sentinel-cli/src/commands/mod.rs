//! Command handlers.
//!
//! Each handler returns a process exit code: 0 on success, 1 on error.
//! Payloads go to stdout, diagnostics to stderr.

pub mod beat;
pub mod regenerate;
pub mod scan;
pub mod status;

/// Output format options shared by every command.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON to stdout for scripted use
    Json,
    /// Human-readable output for interactive use
    Human,
}

/// Print a serializable payload as pretty JSON to stdout.
pub(crate) fn print_json<T: serde::Serialize>(payload: &T) {
    match serde_json::to_string_pretty(payload) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::error!("failed to serialize response: {}", e);
            println!(
                r#"{{"error":"serialization failed: {}"}}"#,
                e.to_string().replace('"', "'")
            );
        }
    }
}
