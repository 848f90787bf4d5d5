//! Config - Aggregate simulation configuration
//!
//! One struct gathers every subsystem's configuration so a whole setup
//! can live in a single JSON document. All fields default to the same
//! values a fresh scene would ship with.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::race::RaceConfig;
use crate::spawn::{BuildingSpawnerConfig, RoadSpawnerConfig, TrafficSpawnerConfig};
use crate::vehicle::{DrivetrainConfig, EngineConfig};

/// Full simulation configuration, immutable once the simulation is
/// constructed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub race: RaceConfig,
    pub drivetrain: DrivetrainConfig,
    pub engine: EngineConfig,
    pub road: RoadSpawnerConfig,
    pub buildings: BuildingSpawnerConfig,
    pub traffic: TrafficSpawnerConfig,
}

impl SimConfig {
    /// Parses a configuration from a JSON document. Missing fields
    /// fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Fail-fast validation of every subsystem config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.road.validate()?;
        self.buildings.validate()?;
        self.traffic.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_json_yields_defaults() {
        let config = SimConfig::from_json("{}").unwrap();
        assert_eq!(config.engine.min_rpm, 1000.0);
        assert_eq!(config.road.segment_length, 5.0);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let config = SimConfig::from_json(
            r#"{
                "engine": {
                    "min_rpm": 800.0,
                    "max_rpm": 9000.0,
                    "gear_speeds_kmh": [50.0, 100.0]
                },
                "race": { "countdown_seconds": 3.0, "finish_line_z": 500.0 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.engine.max_rpm, 9000.0);
        assert_eq!(config.race.finish_line_z, 500.0);
        // Untouched sections keep their defaults.
        assert_eq!(config.drivetrain.acceleration, 5.0);
    }

    #[test]
    fn invalid_section_fails_fast() {
        let result = SimConfig::from_json(
            r#"{ "engine": { "min_rpm": 5000.0, "max_rpm": 1000.0, "gear_speeds_kmh": [50.0] } }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(SimConfig::from_json("not json").is_err());
    }
}
