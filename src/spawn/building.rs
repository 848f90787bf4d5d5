//! Building - Lines of roadside props
//!
//! Each configured line runs parallel to the track at a lateral offset
//! and rolls its own interval, jitter and spawn chance, so the two
//! sides of the road can look different.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::spawn::{DespawnSweep, SpawnPool, Spawner, Vec3};

/// A line along which buildings can spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnLine {
    /// Lateral offset of the line.
    pub x_position: f32,
    /// Height at which props are placed.
    #[serde(default)]
    pub y_position: f32,
    /// Base distance between spawn decisions (meters).
    pub spawn_interval: f32,
    /// Uniform jitter applied to the interval, +/- this much.
    #[serde(default)]
    pub interval_jitter: f32,
    /// Probability of spawning at each decision point.
    pub spawn_chance: f32,
    /// Next longitudinal coordinate at which a spawn decision runs.
    /// Initialized at start, monotonically advances afterwards.
    #[serde(skip)]
    pub next_spawn_z: f32,
}

impl SpawnLine {
    fn next_interval(&self) -> f32 {
        if self.interval_jitter > 0.0 {
            let jitter = self.interval_jitter;
            self.spawn_interval + rand::thread_rng().gen_range(-jitter..jitter)
        } else {
            self.spawn_interval
        }
    }

    fn should_spawn(&self) -> bool {
        rand::random::<f32>() < self.spawn_chance
    }
}

/// Building spawner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingSpawnerConfig {
    pub prefabs: Vec<String>,
    pub pool_size: usize,
    pub lines: Vec<SpawnLine>,
    /// Initial cursor offset relative to the starting player position.
    pub initial_spawn_offset: f32,
    pub spawn_distance_ahead: f32,
    pub despawn_distance_behind: f32,
}

impl Default for BuildingSpawnerConfig {
    fn default() -> Self {
        Self {
            prefabs: vec!["building_a".into(), "building_b".into()],
            pool_size: 50,
            lines: vec![
                SpawnLine {
                    x_position: -12.0,
                    y_position: 0.0,
                    spawn_interval: 10.0,
                    interval_jitter: 2.0,
                    spawn_chance: 0.5,
                    next_spawn_z: 0.0,
                },
                SpawnLine {
                    x_position: 12.0,
                    y_position: 0.0,
                    spawn_interval: 10.0,
                    interval_jitter: 2.0,
                    spawn_chance: 0.5,
                    next_spawn_z: 0.0,
                },
            ],
            initial_spawn_offset: -10.0,
            spawn_distance_ahead: 100.0,
            despawn_distance_behind: 50.0,
        }
    }
}

impl BuildingSpawnerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefabs.is_empty() {
            return Err(ConfigError::EmptyPrefabList { spawner: "building" });
        }
        if self.pool_size == 0 {
            return Err(ConfigError::ZeroPoolSize { spawner: "building" });
        }
        for line in &self.lines {
            if line.spawn_interval <= 0.0 {
                return Err(ConfigError::NonPositiveSpawnInterval {
                    spawner: "building",
                    interval: line.spawn_interval,
                });
            }
            if line.interval_jitter >= line.spawn_interval {
                return Err(ConfigError::ExcessiveIntervalJitter {
                    spawner: "building",
                    jitter: line.interval_jitter,
                    interval: line.spawn_interval,
                });
            }
        }
        Ok(())
    }
}

/// Spawns buildings along the configured lines as the player moves.
/// A spawner with zero lines spawns nothing and never faults.
#[derive(Debug)]
pub struct BuildingSpawner {
    config: BuildingSpawnerConfig,
    pool: SpawnPool,
    sweep: DespawnSweep,
    lines: Vec<SpawnLine>,
}

impl BuildingSpawner {
    pub fn new(config: BuildingSpawnerConfig, player_z: f32) -> Result<Self, ConfigError> {
        config.validate()?;
        let pool = SpawnPool::new(config.prefabs.len(), config.pool_size);
        let sweep = DespawnSweep::new(config.despawn_distance_behind, player_z);
        let lines = config.lines.clone();
        let mut spawner = Self { config, pool, sweep, lines };
        spawner.initialize_spawning(player_z);
        Ok(spawner)
    }

    pub fn pool(&self) -> &SpawnPool {
        &self.pool
    }

    pub fn lines(&self) -> &[SpawnLine] {
        &self.lines
    }
}

impl Spawner for BuildingSpawner {
    fn initialize_spawning(&mut self, player_z: f32) {
        for line in &mut self.lines {
            line.next_spawn_z = player_z + self.config.initial_spawn_offset;
        }
    }

    fn handle_spawning(&mut self, player_z: f32) {
        let horizon = player_z + self.config.spawn_distance_ahead;
        for line in &mut self.lines {
            while line.next_spawn_z < horizon {
                if line.should_spawn() {
                    let id = self.pool.acquire();
                    self.pool.place(
                        id,
                        Vec3::new(line.x_position, line.y_position, line.next_spawn_z),
                    );
                }
                line.next_spawn_z += line.next_interval();
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
