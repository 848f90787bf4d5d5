//! Vehicle Module
//!
//! The player drivetrain: speed integration from throttle/brake input,
//! and the automatic-transmission engine model derived from it.

pub mod drivetrain;
pub mod engine;

pub use drivetrain::{Drivetrain, DrivetrainConfig};
pub use engine::{Engine, EngineConfig};
