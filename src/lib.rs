//! Overdrive - Gameplay core for a lane-based arcade racer
//!
//! Two loosely coupled subsystems driven by one external tick loop:
//! procedural world-segment spawning with object pooling (road tiles,
//! buildings, NPC traffic), and the player drivetrain (throttle/brake
//! speed integration feeding an RPM/gear state machine). Rendering,
//! input devices, audio and UI layout are external collaborators that
//! subscribe to the signals each subsystem owns.

pub mod config;
pub mod error;
pub mod events;
pub mod input;
pub mod race;
pub mod simulation;
pub mod spawn;
pub mod units;
pub mod vehicle;

pub use config::SimConfig;
pub use error::ConfigError;
pub use events::Signal;
pub use input::Controls;
pub use race::{Race, RaceConfig, RaceStatus};
pub use simulation::{SimSnapshot, Simulation};
pub use spawn::{BuildingSpawner, RoadSpawner, SpawnPool, Spawner, TrafficSpawner};
pub use vehicle::{Drivetrain, Engine};
