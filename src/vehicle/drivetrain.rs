//! Drivetrain - Speed integration and forward motion
//!
//! Integrates vehicle speed from the throttle/brake pair each tick and
//! advances the longitudinal position. With neither pedal pressed the
//! car coasts down at half the braking rate. No reverse: speed is
//! floored at zero.

use serde::{Deserialize, Serialize};

use crate::events::Signal;
use crate::input::Controls;

/// Drivetrain configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrivetrainConfig {
    /// Acceleration rate at full throttle (m/s^2).
    pub acceleration: f32,
    /// Deceleration rate at full brake (m/s^2).
    pub deceleration: f32,
}

impl Default for DrivetrainConfig {
    fn default() -> Self {
        Self { acceleration: 5.0, deceleration: 10.0 }
    }
}

/// The player vehicle's speed and position state.
pub struct Drivetrain {
    config: DrivetrainConfig,
    current_speed: f32,
    position_z: f32,
    /// Fired with the new speed (m/s) every tick the drivetrain runs.
    pub on_speed_changed: Signal<f32>,
}

impl Drivetrain {
    pub fn new(config: DrivetrainConfig) -> Self {
        Self {
            config,
            current_speed: 0.0,
            position_z: 0.0,
            on_speed_changed: Signal::new(),
        }
    }

    /// Integrates one tick of movement. Negative `dt` is clamped to
    /// zero; `controls` are clamped to [0, 1].
    pub fn tick(&mut self, dt: f32, controls: Controls) {
        let dt = dt.max(0.0);
        let controls = controls.clamped();

        if controls.throttle > 0.0 {
            self.current_speed += self.config.acceleration * controls.throttle * dt;
        } else if controls.brake > 0.0 {
            self.current_speed -= self.config.deceleration * controls.brake * dt;
            self.current_speed = self.current_speed.max(0.0);
        } else {
            // Natural coast-down when no input is given.
            self.current_speed -= self.config.deceleration * 0.5 * dt;
            self.current_speed = self.current_speed.max(0.0);
        }

        self.position_z += self.current_speed * dt;
        self.on_speed_changed.emit(self.current_speed);
    }

    /// Brings the vehicle to a halt, e.g. when the race ends.
    pub fn stop(&mut self) {
        self.current_speed = 0.0;
        self.on_speed_changed.emit(0.0);
    }

    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    pub fn position_z(&self) -> f32 {
        self.position_z
    }
}

impl std::fmt::Debug for Drivetrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Drivetrain")
            .field("current_speed", &self.current_speed)
            .field("position_z", &self.position_z)
            .finish()
    }
}
