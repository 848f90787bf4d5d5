//! Road - End-to-end segment tiling
//!
//! Tiles fixed-length road segments along the track axis with no
//! randomness and no lane concept. The cursor snaps to a segment
//! boundary at start and backs up two segments so road exists behind
//! the player immediately.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::spawn::{DespawnSweep, SpawnPool, Spawner, Vec3};

/// Road spawner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadSpawnerConfig {
    /// Prefab names, one picked at random per pooled segment.
    pub prefabs: Vec<String>,
    pub pool_size: usize,
    /// Length of each road segment (meters).
    pub segment_length: f32,
    pub spawn_distance_ahead: f32,
    pub despawn_distance_behind: f32,
}

impl Default for RoadSpawnerConfig {
    fn default() -> Self {
        Self {
            prefabs: vec!["road_straight".into()],
            pool_size: 50,
            segment_length: 5.0,
            spawn_distance_ahead: 100.0,
            despawn_distance_behind: 50.0,
        }
    }
}

impl RoadSpawnerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefabs.is_empty() {
            return Err(ConfigError::EmptyPrefabList { spawner: "road" });
        }
        if self.pool_size == 0 {
            return Err(ConfigError::ZeroPoolSize { spawner: "road" });
        }
        if self.segment_length <= 0.0 {
            return Err(ConfigError::NonPositiveSegmentLength(self.segment_length));
        }
        Ok(())
    }
}

/// Spawns road segments as the player moves forward.
#[derive(Debug)]
pub struct RoadSpawner {
    config: RoadSpawnerConfig,
    pool: SpawnPool,
    sweep: DespawnSweep,
    next_spawn_z: f32,
}

impl RoadSpawner {
    pub fn new(config: RoadSpawnerConfig, player_z: f32) -> Result<Self, ConfigError> {
        config.validate()?;
        let pool = SpawnPool::new(config.prefabs.len(), config.pool_size);
        let sweep = DespawnSweep::new(config.despawn_distance_behind, player_z);
        let mut spawner = Self { config, pool, sweep, next_spawn_z: 0.0 };
        spawner.initialize_spawning(player_z);
        Ok(spawner)
    }

    pub fn pool(&self) -> &SpawnPool {
        &self.pool
    }

    fn spawn_segment_at(&mut self, z: f32) {
        let id = self.pool.acquire();
        self.pool.place(id, Vec3::new(0.0, 0.0, z));
    }
}

impl Spawner for RoadSpawner {
    fn initialize_spawning(&mut self, player_z: f32) {
        let len = self.config.segment_length;
        // Start a couple of segments behind the player.
        self.next_spawn_z = (player_z / len).floor() * len - len * 2.0;
    }

    fn handle_spawning(&mut self, player_z: f32) {
        while self.next_spawn_z < player_z + self.config.spawn_distance_ahead {
            let z = self.next_spawn_z;
            self.spawn_segment_at(z);
            self.next_spawn_z += self.config.segment_length;
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

    fn config(len: f32, ahead: f32) -> RoadSpawnerConfig {
        RoadSpawnerConfig {
            pool_size: 64,
            segment_length: len,
            spawn_distance_ahead: ahead,
            ..RoadSpawnerConfig::default()
        }
    }

    fn active_zs(spawner: &RoadSpawner) -> Vec<f32> {
        let mut zs: Vec<f32> = spawner
            .pool()
            .props()
            .iter()
            .filter(|p| p.active)
            .map(|p| p.position.z)
            .collect();
        zs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        zs
    }

    #[test]
    fn tiles_gaplessly_from_two_segments_behind() {
        let mut spawner = RoadSpawner::new(config(5.0, 20.0), 0.0).unwrap();
        spawner.update(0.0);

        // -10, -5, 0, 5, 10, 15 (cursor stops once it reaches 20).
        assert_eq!(active_zs(&spawner), vec![-10.0, -5.0, 0.0, 5.0, 10.0, 15.0]);
    }

    #[test]
    fn cursor_snaps_to_segment_boundary() {
        let mut spawner = RoadSpawner::new(config(5.0, 10.0), 13.0).unwrap();
        spawner.update(13.0);

        // floor(13/5)*5 - 10 = 0, then every 5m up to 23.
        assert_eq!(active_zs(&spawner), vec![0.0, 5.0, 10.0, 15.0, 20.0]);
    }

    #[test]
    fn forward_motion_extends_tiling_without_gaps() {
        let mut spawner = RoadSpawner::new(config(5.0, 20.0), 0.0).unwrap();
        for step in 0..40 {
            spawner.update(step as f32 * 2.5);
        }
        let zs = active_zs(&spawner);
        for pair in zs.windows(2) {
            assert!((pair[1] - pair[0] - 5.0).abs() < 1e-4, "gap in road tiling");
        }
    }

    #[test]
    fn despawn_sweep_drops_segments_behind_limit() {
        let mut spawner = RoadSpawner::new(config(5.0, 20.0), 0.0).unwrap();
        spawner.update(0.0);
        // Travel past the despawn gate (50m behind by default).
        spawner.update(60.0);

        let limit = 60.0 - 50.0;
        for prop in spawner.pool().props() {
            if prop.active {
                assert!(prop.position.z >= limit);
            }
        }
    }

    #[test]
    fn rejects_degenerate_config() {
        assert!(RoadSpawner::new(config(0.0, 20.0), 0.0).is_err());
        let mut empty = config(5.0, 20.0);
        empty.prefabs.clear();
        assert!(RoadSpawner::new(empty, 0.0).is_err());
    }
}
