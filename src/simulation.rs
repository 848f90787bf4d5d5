//! Simulation - Top-level tick driver
//!
//! Owns every subsystem and advances them in a fixed order each tick:
//! race timing, then spawning (spawn before the gated despawn sweep),
//! then NPC movement, then the drivetrain and engine, so UI/audio/wheel
//! consumers observe one self-consistent snapshot per tick.

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::input::Controls;
use crate::race::{Race, RaceStatus};
use crate::spawn::{BuildingSpawner, RoadSpawner, Spawner, TrafficSpawner};
use crate::vehicle::{Drivetrain, Engine};

/// The whole gameplay core behind one `tick` entry point.
pub struct Simulation {
    race: Race,
    drivetrain: Drivetrain,
    engine: Engine,
    road: RoadSpawner,
    buildings: BuildingSpawner,
    traffic: TrafficSpawner,
}

impl Simulation {
    /// Builds every subsystem from `config`, failing fast on any
    /// configuration error.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let player_z = 0.0;
        let sim = Self {
            race: Race::new(config.race),
            drivetrain: Drivetrain::new(config.drivetrain),
            engine: Engine::new(config.engine)?,
            road: RoadSpawner::new(config.road, player_z)?,
            buildings: BuildingSpawner::new(config.buildings, player_z)?,
            traffic: TrafficSpawner::new(config.traffic, player_z)?,
        };
        log::info!(
            "simulation initialized: {} gears, finish line at {}m",
            sim.engine.gear_count(),
            sim.race.finish_line_z()
        );
        Ok(sim)
    }

    /// Begins the pre-race countdown.
    pub fn start_race(&mut self) {
        self.race.start_countdown();
    }

    /// Advances the whole simulation by one tick. Negative `dt` and
    /// out-of-range controls are clamped.
    pub fn tick(&mut self, dt: f32, controls: Controls) {
        let dt = dt.max(0.0);
        self.race.update(dt);

        let player_z = self.drivetrain.position_z();
        self.road.update(player_z);
        self.buildings.update(player_z);
        self.traffic.update(player_z);
        self.traffic.advance(dt);

        if self.race.status() == RaceStatus::Racing {
            self.drivetrain.tick(dt, controls);
            self.engine.on_speed_changed(self.drivetrain.current_speed());

            if self.drivetrain.position_z() >= self.race.finish_line_z() {
                self.race.end_race();
                self.drivetrain.stop();
                self.engine.on_speed_changed(0.0);
            }
        }
    }

    /// Compact state for UI or IPC consumers that poll instead of
    /// subscribing.
    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            status: self.race.status(),
            countdown: self.race.countdown_display(),
            race_time: self.race.race_time(),
            speed: self.drivetrain.current_speed(),
            position_z: self.drivetrain.position_z(),
            rpm: self.engine.engine_rpm(),
            gear: self.engine.current_gear(),
            active_road_segments: self.road.pool().active_count(),
            active_buildings: self.buildings.pool().active_count(),
            active_npc_cars: self.traffic.pool().active_count(),
        }
    }

    pub fn race(&mut self) -> &mut Race {
        &mut self.race
    }

    pub fn drivetrain(&mut self) -> &mut Drivetrain {
        &mut self.drivetrain
    }

    pub fn engine(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn road(&self) -> &RoadSpawner {
        &self.road
    }

    pub fn buildings(&self) -> &BuildingSpawner {
        &self.buildings
    }

    pub fn traffic(&self) -> &TrafficSpawner {
        &self.traffic
    }
}

/// Compact snapshot of the simulation for transfer or display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub status: RaceStatus,
    pub countdown: Option<u32>,
    pub race_time: f32,
    pub speed: f32,
    pub position_z: f32,
    pub rpm: f32,
    pub gear: u32,
    pub active_road_segments: usize,
    pub active_buildings: usize,
    pub active_npc_cars: usize,
}
