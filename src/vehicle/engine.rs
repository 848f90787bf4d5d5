//! Engine - RPM derivation and automatic gear shifting
//!
//! RPM is linear in the fraction of the current gear's speed range
//! consumed, clamped to the configured band. Gear shifts use
//! hysteresis: up at 95% of max RPM, down at 105% of min RPM, carrying
//! the overshoot into the new gear's band rather than resetting.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::events::Signal;
use crate::units::kmh_to_ms;

const UPSHIFT_FRACTION: f32 = 0.95;
const DOWNSHIFT_FRACTION: f32 = 1.05;

/// Engine configuration. Gear top speeds are given in km/h, matching
/// how they read on a dashboard; they are converted to m/s once at
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub min_rpm: f32,
    pub max_rpm: f32,
    pub gear_speeds_kmh: Vec<f32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_rpm: 1000.0,
            max_rpm: 7000.0,
            gear_speeds_kmh: vec![40.0, 70.0, 110.0, 160.0, 220.0],
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gear_speeds_kmh.is_empty() {
            return Err(ConfigError::EmptyGearTable);
        }
        for (i, &speed) in self.gear_speeds_kmh.iter().enumerate() {
            // A zero top speed would make the RPM ratio 0/0.
            if speed <= 0.0 {
                return Err(ConfigError::NonPositiveGearSpeed {
                    gear: i + 1,
                    speed_kmh: speed,
                });
            }
        }
        if self.min_rpm >= self.max_rpm {
            return Err(ConfigError::InvalidRpmBand {
                min: self.min_rpm,
                max: self.max_rpm,
            });
        }
        Ok(())
    }
}

/// Engine RPM/gear state machine. States are gears 1..=N; the vehicle
/// always starts in gear 1 at min RPM.
pub struct Engine {
    min_rpm: f32,
    max_rpm: f32,
    /// Gear top speeds in m/s, indexed by gear - 1.
    gear_speeds: Vec<f32>,
    current_gear: u32,
    engine_rpm: f32,
    /// Fired with the new RPM on every recompute.
    pub on_rpm_changed: Signal<f32>,
    /// Fired with the new gear on every shift.
    pub on_gear_changed: Signal<u32>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let gear_speeds = config.gear_speeds_kmh.iter().copied().map(kmh_to_ms).collect();
        Ok(Self {
            min_rpm: config.min_rpm,
            max_rpm: config.max_rpm,
            gear_speeds,
            current_gear: 1,
            engine_rpm: config.min_rpm,
            on_rpm_changed: Signal::new(),
            on_gear_changed: Signal::new(),
        })
    }

    /// Reacts to a speed change: recomputes RPM, then evaluates at most
    /// one gear shift.
    pub fn on_speed_changed(&mut self, current_speed: f32) {
        self.update_rpm(current_speed);
        self.handle_gear_shift();
    }

    fn update_rpm(&mut self, current_speed: f32) {
        let gear_top_speed = self.gear_speeds[self.current_gear as usize - 1];
        let rpm = self.min_rpm
            + (current_speed / gear_top_speed) * (self.max_rpm - self.min_rpm);
        self.engine_rpm = rpm.clamp(self.min_rpm, self.max_rpm);
        self.on_rpm_changed.emit(self.engine_rpm);
    }

    // Upshift is evaluated first and wins if a pathological config
    // makes both thresholds hold at once. The carry-over value is
    // deliberately not clamped.
    fn handle_gear_shift(&mut self) {
        let up_threshold = self.max_rpm * UPSHIFT_FRACTION;
        let down_threshold = self.min_rpm * DOWNSHIFT_FRACTION;

        if self.current_gear < self.gear_speeds.len() as u32 && self.engine_rpm >= up_threshold {
            self.current_gear += 1;
            self.engine_rpm = self.min_rpm + (self.engine_rpm - up_threshold);
            log::debug!("shifted up to gear {}", self.current_gear);
            self.on_gear_changed.emit(self.current_gear);
        } else if self.current_gear > 1 && self.engine_rpm <= down_threshold {
            self.current_gear -= 1;
            self.engine_rpm = self.max_rpm - (down_threshold - self.engine_rpm);
            log::debug!("shifted down to gear {}", self.current_gear);
            self.on_gear_changed.emit(self.current_gear);
        }
    }

    pub fn current_gear(&self) -> u32 {
        self.current_gear
    }

    pub fn engine_rpm(&self) -> f32 {
        self.engine_rpm
    }

    pub fn gear_count(&self) -> u32 {
        self.gear_speeds.len() as u32
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("current_gear", &self.current_gear)
            .field("engine_rpm", &self.engine_rpm)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Gear top speeds of 10/20/30 m/s.
    fn engine_10_20_30() -> Engine {
        Engine::new(EngineConfig {
            min_rpm: 1000.0,
            max_rpm: 7000.0,
            gear_speeds_kmh: vec![36.0, 72.0, 108.0],
        })
        .unwrap()
    }

    #[test]
    fn starts_in_first_gear_at_min_rpm() {
        let engine = engine_10_20_30();
        assert_eq!(engine.current_gear(), 1);
        assert_eq!(engine.engine_rpm(), 1000.0);
    }

    #[test]
    fn rpm_is_linear_in_gear_speed_fraction() {
        let mut engine = engine_10_20_30();
        engine.on_speed_changed(5.0);
        // Half of gear 1's 10 m/s range: 1000 + 0.5 * 6000 = 4000.
        assert!((engine.engine_rpm() - 4000.0).abs() < 1e-3);
        assert_eq!(engine.current_gear(), 1);
    }

    #[test]
    fn redline_upshift_carries_overshoot() {
        let mut engine = engine_10_20_30();
        engine.on_speed_changed(10.0);
        // RPM clamps at 7000, shifts up, carries 1000 + (7000 - 6650).
        assert_eq!(engine.current_gear(), 2);
        assert!((engine.engine_rpm() - 1350.0).abs() < 1e-3);
    }

    #[test]
    fn downshift_carries_undershoot() {
        let mut engine = engine_10_20_30();
        engine.on_speed_changed(10.0);
        assert_eq!(engine.current_gear(), 2);

        engine.on_speed_changed(0.0);
        // RPM clamps at 1000 <= 1050, shifts down with unclamped carry:
        // 7000 - (1050 - 1000) = 6950.
        assert_eq!(engine.current_gear(), 1);
        assert!((engine.engine_rpm() - 6950.0).abs() < 1e-3);
    }

    #[test]
    fn top_gear_saturates_instead_of_shifting() {
        let mut engine = engine_10_20_30();
        // Walk up to top gear.
        engine.on_speed_changed(10.0);
        engine.on_speed_changed(20.0);
        assert_eq!(engine.current_gear(), 3);

        engine.on_speed_changed(100.0);
        assert_eq!(engine.current_gear(), 3);
        assert_eq!(engine.engine_rpm(), 7000.0);
    }

    #[test]
    fn first_gear_floor_saturates() {
        let mut engine = engine_10_20_30();
        engine.on_speed_changed(0.0);
        assert_eq!(engine.current_gear(), 1);
        assert_eq!(engine.engine_rpm(), 1000.0);
    }

    #[test]
    fn at_most_one_shift_per_update() {
        let mut engine = engine_10_20_30();
        let shifts = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&shifts);
        engine.on_gear_changed.connect(move |_| counter.set(counter.get() + 1));

        // A huge speed jump still moves one gear at a time.
        engine.on_speed_changed(30.0);
        assert_eq!(shifts.get(), 1);
        assert_eq!(engine.current_gear(), 2);
    }

    #[test]
    fn rpm_stays_in_band_across_a_ramp() {
        let mut engine = engine_10_20_30();
        let mut speed = 0.0;
        while speed < 35.0 {
            engine.on_speed_changed(speed);
            let rpm = engine.engine_rpm();
            // Post-update RPM honors the band except for the transient
            // shift carry, which immediately re-derives next update.
            assert!(engine.current_gear() >= 1 && engine.current_gear() <= 3);
            assert!(rpm >= 1000.0 - 1e-3 && rpm <= 7000.0 + 1e-3);
            speed += 0.05;
        }
    }

    #[test]
    fn gear_signal_reports_shifts() {
        let mut engine = engine_10_20_30();
        let last_gear = Rc::new(Cell::new(0u32));
        let seen = Rc::clone(&last_gear);
        engine.on_gear_changed.connect(move |g| seen.set(g));

        engine.on_speed_changed(10.0);
        assert_eq!(last_gear.get(), 2);
    }

    #[test]
    fn rejects_bad_config() {
        assert!(Engine::new(EngineConfig {
            min_rpm: 1000.0,
            max_rpm: 7000.0,
            gear_speeds_kmh: vec![],
        })
        .is_err());
        assert!(Engine::new(EngineConfig {
            min_rpm: 7000.0,
            max_rpm: 1000.0,
            gear_speeds_kmh: vec![36.0],
        })
        .is_err());
    }

    #[test]
    fn rejects_non_positive_gear_speed() {
        // A zero entry would derive RPM as 0/0 = NaN at standstill and
        // break the band invariant; it must fail at construction.
        assert!(Engine::new(EngineConfig {
            min_rpm: 1000.0,
            max_rpm: 7000.0,
            gear_speeds_kmh: vec![0.0, 70.0],
        })
        .is_err());
        assert!(Engine::new(EngineConfig {
            min_rpm: 1000.0,
            max_rpm: 7000.0,
            gear_speeds_kmh: vec![40.0, -70.0],
        })
        .is_err());
    }
}
