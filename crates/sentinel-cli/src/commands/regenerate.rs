//! `regenerate` command: rebuild one sensor in place.
//!
//! Each invocation builds a fresh guardian, so this is an exercise of
//! the regeneration path rather than surgery on a long-lived process;
//! embedded deployments call `Guardian::regenerate` directly.

use clap::Args;
use serde::Serialize;

use sentinel_core::guardian::Guardian;
use sentinel_core::types::Specialization;

use super::{print_json, OutputFormat};

/// Arguments for the `regenerate` command.
#[derive(Args, Debug)]
pub struct RegenerateArgs {
    /// Index of the sensor to regenerate (0..8)
    pub sensor_id: usize,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

/// Response from the `regenerate` command.
#[derive(Debug, Serialize)]
pub struct RegenerateResponse {
    /// The regenerated sensor's index
    pub sensor_id: usize,
    /// The regenerated sensor's topic
    pub specialization: Specialization,
    /// Learning records seeded from the other sensors
    pub seeded_history: usize,
}

/// Execute the `regenerate` command.
pub fn regenerate_command(args: RegenerateArgs) -> i32 {
    let mut guardian = Guardian::new();

    let (specialization, seeded) = match guardian.regenerate(args.sensor_id) {
        Ok(sensor) => (sensor.specialization(), sensor.learning_history().len()),
        Err(e) => {
            eprintln!("regeneration failed: {}", e);
            return 1;
        }
    };

    let response = RegenerateResponse {
        sensor_id: args.sensor_id,
        specialization,
        seeded_history: seeded,
    };

    match args.format {
        OutputFormat::Json => print_json(&response),
        OutputFormat::Human => {
            println!(
                "Sensor {} ({}) regenerated, {} records seeded",
                response.sensor_id, response.specialization, response.seeded_history
            );
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_id_succeeds() {
        let args = RegenerateArgs {
            sensor_id: 0,
            format: OutputFormat::Json,
        };
        assert_eq!(regenerate_command(args), 0);
    }

    #[test]
    fn out_of_range_id_exits_nonzero() {
        let args = RegenerateArgs {
            sensor_id: 99,
            format: OutputFormat::Json,
        };
        assert_eq!(regenerate_command(args), 1);
    }
}
