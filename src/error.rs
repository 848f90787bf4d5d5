//! Error - Configuration validation faults
//!
//! All of these surface at construction time. The per-tick paths never
//! error; out-of-range tick inputs are clamped instead.

use thiserror::Error;

/// A configuration problem detected while building the simulation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A spawner was configured with no prefabs to instantiate.
    #[error("{spawner} spawner has an empty prefab list")]
    EmptyPrefabList { spawner: &'static str },

    /// A spawner was configured with a zero-capacity pool.
    #[error("{spawner} spawner has a zero pool size")]
    ZeroPoolSize { spawner: &'static str },

    /// The engine has no gear table to index.
    #[error("engine gear table is empty")]
    EmptyGearTable,

    /// The RPM band is inverted or degenerate.
    #[error("invalid RPM band: min {min} must be below max {max}")]
    InvalidRpmBand { min: f32, max: f32 },

    /// Road segments must have positive length to tile the track.
    #[error("road segment length {0} must be positive")]
    NonPositiveSegmentLength(f32),

    /// Spawn cursors only make progress with a positive interval.
    #[error("{spawner} spawner interval {interval} must be positive")]
    NonPositiveSpawnInterval { spawner: &'static str, interval: f32 },

    /// Jitter at or above the base interval can draw a non-positive
    /// step and stall the spawn cursor.
    #[error("{spawner} spawner jitter {jitter} must be below interval {interval}")]
    ExcessiveIntervalJitter {
        spawner: &'static str,
        jitter: f32,
        interval: f32,
    },

    /// A gear with a non-positive top speed makes the RPM ratio NaN.
    #[error("gear {gear} top speed {speed_kmh} km/h must be positive")]
    NonPositiveGearSpeed { gear: usize, speed_kmh: f32 },

    /// The top-level config failed to parse.
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}
