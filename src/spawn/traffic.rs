//! Traffic - NPC vehicles per lane
//!
//! Lanes carry a speed as well as spawn parameters: a car spawned into
//! a lane inherits that lane's speed and then moves forward at it every
//! tick, the whole extent of NPC "AI" in an arcade racer.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::spawn::{DespawnSweep, SpawnPool, Spawner, Vec3};

/// A lane in which NPC cars can spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficLane {
    /// Lateral offset of the lane.
    pub x_position: f32,
    /// Speed NPC cars in this lane move at (m/s).
    pub speed: f32,
    /// Minimum distance between spawn decisions (meters).
    pub min_spawn_interval: f32,
    /// Maximum distance between spawn decisions (meters).
    pub max_spawn_interval: f32,
    /// Probability of spawning a car at each decision point.
    pub spawn_chance: f32,
    /// Next longitudinal coordinate at which a spawn decision runs.
    #[serde(skip)]
    pub next_spawn_z: f32,
}

impl TrafficLane {
    fn next_interval(&self) -> f32 {
        if self.max_spawn_interval > self.min_spawn_interval {
            rand::thread_rng().gen_range(self.min_spawn_interval..self.max_spawn_interval)
        } else {
            self.min_spawn_interval
        }
    }

    fn should_spawn(&self) -> bool {
        rand::random::<f32>() < self.spawn_chance
    }
}

/// Traffic spawner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficSpawnerConfig {
    pub prefabs: Vec<String>,
    pub pool_size: usize,
    pub lanes: Vec<TrafficLane>,
    pub spawn_distance_ahead: f32,
    pub despawn_distance_behind: f32,
}

impl Default for TrafficSpawnerConfig {
    fn default() -> Self {
        Self {
            prefabs: vec!["npc_sedan".into(), "npc_truck".into()],
            pool_size: 50,
            lanes: vec![
                TrafficLane {
                    x_position: -2.0,
                    speed: 10.0,
                    min_spawn_interval: 20.0,
                    max_spawn_interval: 40.0,
                    spawn_chance: 0.5,
                    next_spawn_z: 0.0,
                },
                TrafficLane {
                    x_position: 2.0,
                    speed: 14.0,
                    min_spawn_interval: 20.0,
                    max_spawn_interval: 40.0,
                    spawn_chance: 0.5,
                    next_spawn_z: 0.0,
                },
            ],
            spawn_distance_ahead: 100.0,
            despawn_distance_behind: 50.0,
        }
    }
}

impl TrafficSpawnerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefabs.is_empty() {
            return Err(ConfigError::EmptyPrefabList { spawner: "traffic" });
        }
        if self.pool_size == 0 {
            return Err(ConfigError::ZeroPoolSize { spawner: "traffic" });
        }
        for lane in &self.lanes {
            // With max <= min the interval collapses to min, so min
            // alone decides whether the cursor makes progress.
            if lane.min_spawn_interval <= 0.0 {
                return Err(ConfigError::NonPositiveSpawnInterval {
                    spawner: "traffic",
                    interval: lane.min_spawn_interval,
                });
            }
        }
        Ok(())
    }
}

/// Spawns NPC cars into the configured lanes.
#[derive(Debug)]
pub struct TrafficSpawner {
    config: TrafficSpawnerConfig,
    pool: SpawnPool,
    sweep: DespawnSweep,
    lanes: Vec<TrafficLane>,
}

impl TrafficSpawner {
    pub fn new(config: TrafficSpawnerConfig, player_z: f32) -> Result<Self, ConfigError> {
        config.validate()?;
        let pool = SpawnPool::new(config.prefabs.len(), config.pool_size);
        let sweep = DespawnSweep::new(config.despawn_distance_behind, player_z);
        let lanes = config.lanes.clone();
        let mut spawner = Self { config, pool, sweep, lanes };
        spawner.initialize_spawning(player_z);
        Ok(spawner)
    }

    pub fn pool(&self) -> &SpawnPool {
        &self.pool
    }

    pub fn lanes(&self) -> &[TrafficLane] {
        &self.lanes
    }

    /// Moves every active NPC car forward at its lane speed.
    pub fn advance(&mut self, dt: f32) {
        for prop in self.pool.iter_active_mut() {
            prop.position.z += prop.speed * dt;
        }
    }
}

impl Spawner for TrafficSpawner {
    fn initialize_spawning(&mut self, player_z: f32) {
        for lane in &mut self.lanes {
            lane.next_spawn_z = player_z + lane.next_interval();
        }
    }

    fn handle_spawning(&mut self, player_z: f32) {
        let horizon = player_z + self.config.spawn_distance_ahead;
        for lane in &mut self.lanes {
            while lane.next_spawn_z < horizon {
                if lane.should_spawn() {
                    let id = self.pool.acquire();
                    self.pool.place(id, Vec3::new(lane.x_position, 0.0, lane.next_spawn_z));
                    self.pool.get_mut(id).speed = lane.speed;
                }
                lane.next_spawn_z += lane.next_interval();
            }
        }
    }

    fn despawn_behind(&mut self, z_limit: f32) {
        self.pool.deactivate_behind(z_limit);
    }

    fn sweep(&mut self) -> &mut DespawnSweep {
        &mut self.sweep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_lane_config(speed: f32, interval: f32, chance: f32) -> TrafficSpawnerConfig {
        TrafficSpawnerConfig {
            prefabs: vec!["npc".into()],
            pool_size: 16,
            lanes: vec![TrafficLane {
                x_position: 2.0,
                speed,
                min_spawn_interval: interval,
                max_spawn_interval: interval,
                spawn_chance: chance,
                next_spawn_z: 0.0,
            }],
            spawn_distance_ahead: 100.0,
            despawn_distance_behind: 50.0,
        }
    }

    #[test]
    fn spawned_cars_inherit_lane_speed() {
        let mut spawner = TrafficSpawner::new(single_lane_config(12.5, 25.0, 1.0), 0.0).unwrap();
        spawner.handle_spawning(0.0);

        let active: Vec<_> = spawner.pool().props().iter().filter(|p| p.active).collect();
        assert!(!active.is_empty());
        for prop in active {
            assert_eq!(prop.speed, 12.5);
            assert_eq!(prop.position.x, 2.0);
        }
    }

    #[test]
    fn lane_cursor_initialized_one_interval_ahead() {
        let spawner = TrafficSpawner::new(single_lane_config(10.0, 25.0, 1.0), 100.0).unwrap();
        assert_eq!(spawner.lanes()[0].next_spawn_z, 125.0);
    }

    #[test]
    fn advance_moves_active_cars_only() {
        let mut spawner = TrafficSpawner::new(single_lane_config(10.0, 25.0, 1.0), 0.0).unwrap();
        spawner.handle_spawning(0.0);

        let before: Vec<f32> = spawner.pool().props().iter().map(|p| p.position.z).collect();
        spawner.advance(2.0);
        for (prop, z_before) in spawner.pool().props().iter().zip(before) {
            if prop.active {
                assert!((prop.position.z - (z_before + 20.0)).abs() < 1e-4);
            } else {
                assert_eq!(prop.position.z, z_before);
            }
        }
    }

    #[test]
    fn fixed_interval_spawns_are_evenly_spaced() {
        let mut spawner = TrafficSpawner::new(single_lane_config(10.0, 25.0, 1.0), 0.0).unwrap();
        spawner.handle_spawning(0.0);

        let mut zs: Vec<f32> = spawner
            .pool()
            .props()
            .iter()
            .filter(|p| p.active)
            .map(|p| p.position.z)
            .collect();
        zs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        // First car one interval out, then every 25m until the horizon.
        assert_eq!(zs, vec![25.0, 50.0, 75.0]);
    }

    #[test]
    fn rejects_non_positive_min_interval() {
        // min is the interval floor; zero would stall the lane cursor
        // inside handle_spawning.
        let config = single_lane_config(10.0, 0.0, 1.0);
        assert!(TrafficSpawner::new(config, 0.0).is_err());

        let mut config = single_lane_config(10.0, 25.0, 1.0);
        config.lanes[0].min_spawn_interval = -5.0;
        assert!(TrafficSpawner::new(config, 0.0).is_err());
    }

    #[test]
    fn zero_chance_lane_stays_empty() {
        let mut spawner = TrafficSpawner::new(single_lane_config(10.0, 25.0, 0.0), 0.0).unwrap();
        spawner.update(0.0);
        assert_eq!(spawner.pool().active_count(), 0);
    }
}
