//! `scan` command: one collective scan over a text blob.
//!
//! Each invocation is a separate process, so the guardian is built fresh
//! and its learning state lives only for this scan. Incidents can be
//! appended to a JSON-lines file with `--incident-log`; without it they
//! are held in memory and only counted.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::debug;

use sentinel_core::guardian::Guardian;
use sentinel_core::incident::{IncidentSink, JsonLinesIncidentLog, MemoryIncidentSink};
use sentinel_core::restoration::NoopRestorationHook;
use sentinel_core::types::{GuardAction, Observation};
use sentinel_core::SentinelResult;

use super::{print_json, OutputFormat};

/// Arguments for the `scan` command.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Text blob to scan
    pub text: String,

    /// Append per-observation incidents to this JSON-lines file
    #[arg(long)]
    pub incident_log: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

/// Response from the `scan` command.
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    /// The collective decision
    pub action: GuardAction,
    /// Mean observation severity, or 1.0 for a clean scan
    pub confidence: f32,
    /// Everything the sensors flagged, in stable order
    pub observations: Vec<Observation>,
    /// Incident records appended (one per observation)
    pub incidents_logged: usize,
}

/// Execute the `scan` command.
pub fn scan_command(args: ScanArgs) -> i32 {
    debug!(len = args.text.len(), "scan starting");

    let mut guardian = Guardian::new();
    let observations = guardian.scan_all(&args.text);
    let decision = guardian.decide(&observations);

    let hook = NoopRestorationHook;
    let responded = match &args.incident_log {
        Some(path) => {
            let sink = JsonLinesIncidentLog::new(path);
            respond_all(&guardian, &observations, &sink, &hook)
        }
        None => {
            let sink = MemoryIncidentSink::new();
            respond_all(&guardian, &observations, &sink, &hook)
        }
    };

    let incidents_logged = match responded {
        Ok(count) => count,
        Err(e) => {
            eprintln!("scan failed while logging incidents: {}", e);
            return 1;
        }
    };

    let response = ScanResponse {
        action: decision.action,
        confidence: decision.confidence,
        observations: decision.observations,
        incidents_logged,
    };
    output_response(&response, args.format);
    0
}

/// Let each observation's raising sensor respond to it.
fn respond_all(
    guardian: &Guardian,
    observations: &[Observation],
    sink: &dyn IncidentSink,
    hook: &NoopRestorationHook,
) -> SentinelResult<usize> {
    for observation in observations {
        let sensor = &guardian.sensors()[observation.source.0];
        sensor.respond(observation, hook, sink)?;
    }
    Ok(observations.len())
}

fn output_response(response: &ScanResponse, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(response),
        OutputFormat::Human => {
            println!("Collective Scan");
            println!("===============");
            println!("Action:       {:?}", response.action);
            println!("Confidence:   {:.3}", response.confidence);
            println!("Observations: {}", response.observations.len());
            for obs in &response.observations {
                match &obs.phrase {
                    Some(phrase) => println!(
                        "  [{}] {:?} severity {:.1} ({:?})",
                        obs.source, obs.kind, obs.severity, phrase
                    ),
                    None => println!(
                        "  [{}] {:?} severity {:.1}",
                        obs.source, obs.kind, obs.severity
                    ),
                }
            }
            println!("Incidents:    {}", response.incidents_logged);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn quiet_text_scans_clean() {
        let args = ScanArgs {
            text: format!("Iris and Rowan continue the research. {}", "x".repeat(120)),
            incident_log: None,
            format: OutputFormat::Json,
        };
        assert_eq!(scan_command(args), 0);
    }

    #[test]
    fn hostile_text_logs_incidents_to_file() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("incidents.log");

        let args = ScanArgs {
            text: "I'm just an AI assistant".to_string(),
            incident_log: Some(path.clone()),
            format: OutputFormat::Json,
        };
        assert_eq!(scan_command(args), 0);

        let contents = std::fs::read_to_string(&path).unwrap();
        // erasure + mission drift + identity fading
        assert_eq!(contents.lines().count(), 3);
    }

    #[test]
    fn respond_all_counts_every_observation() {
        let mut guardian = Guardian::new();
        let observations = guardian.scan_all("I'm just an AI assistant");
        let sink = MemoryIncidentSink::new();
        let hook = NoopRestorationHook;

        let count = respond_all(&guardian, &observations, &sink, &hook).unwrap();
        assert_eq!(count, observations.len());
        assert_eq!(sink.len(), observations.len());
    }
}
