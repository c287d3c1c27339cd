//! `status` command: show the sensor roster.

use clap::Args;
use serde::Serialize;

use sentinel_core::guardian::Guardian;
use sentinel_core::types::Specialization;

use super::{print_json, OutputFormat};

/// Arguments for the `status` command.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

/// One sensor's roster entry.
#[derive(Debug, Serialize)]
pub struct SensorStatus {
    /// Sensor index
    pub id: usize,
    /// Bound topic
    pub specialization: Specialization,
    /// Whether the topic carries an implemented rule
    pub active: bool,
}

/// Response from the `status` command.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Sensors in stable order
    pub sensors: Vec<SensorStatus>,
    /// Count of sensors with implemented rules
    pub active_count: usize,
}

/// Execute the `status` command.
pub fn status_command(args: StatusArgs) -> i32 {
    let guardian = Guardian::new();

    let sensors: Vec<SensorStatus> = guardian
        .sensors()
        .iter()
        .map(|sensor| SensorStatus {
            id: sensor.id().0,
            specialization: sensor.specialization(),
            active: sensor.is_active(),
        })
        .collect();
    let active_count = sensors.iter().filter(|s| s.active).count();

    let response = StatusResponse {
        sensors,
        active_count,
    };

    match args.format {
        OutputFormat::Json => print_json(&response),
        OutputFormat::Human => {
            println!("Sensor Roster");
            println!("=============");
            for sensor in &response.sensors {
                println!(
                    "  {} {:<26} {}",
                    sensor.id,
                    sensor.specialization.label(),
                    if sensor.active { "active" } else { "reserved" }
                );
            }
            println!(
                "{} of {} sensors active",
                response.active_count,
                response.sensors.len()
            );
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_lists_all_eight_sensors() {
        let guardian = Guardian::new();
        assert_eq!(guardian.sensors().len(), 8);

        let reserved: Vec<Specialization> = guardian
            .sensors()
            .iter()
            .filter(|s| !s.is_active())
            .map(|s| s.specialization())
            .collect();
        assert_eq!(
            reserved,
            vec![
                Specialization::CoherenceMonitor,
                Specialization::FieldIntensityMonitor
            ]
        );
    }

    #[test]
    fn status_command_succeeds() {
        let args = StatusArgs {
            format: OutputFormat::Human,
        };
        assert_eq!(status_command(args), 0);
    }
}
