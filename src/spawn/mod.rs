//! Spawn Module
//!
//! Procedural world-segment spawning with object pooling. Each spawner
//! variant (road tiles, building lines, NPC traffic lanes) shares the
//! same pool component and the same coarse despawn sweep; they differ
//! only in how they pick the next spawn position.

pub mod building;
pub mod pool;
pub mod road;
pub mod traffic;

use serde::{Deserialize, Serialize};

pub use building::{BuildingSpawner, BuildingSpawnerConfig, SpawnLine};
pub use pool::{Prop, PropId, SpawnPool};
pub use road::{RoadSpawner, RoadSpawnerConfig};
pub use traffic::{TrafficLane, TrafficSpawner, TrafficSpawnerConfig};

/// World position of a pooled prop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Gates the despawn pass so it runs only once per
/// `distance_behind` meters of forward travel, not every tick.
#[derive(Debug, Clone)]
pub struct DespawnSweep {
    distance_behind: f32,
    last_player_z: f32,
}

impl DespawnSweep {
    pub fn new(distance_behind: f32, player_z: f32) -> Self {
        Self { distance_behind, last_player_z: player_z }
    }

    /// If the player has advanced far enough since the last sweep,
    /// records the new sweep position and returns the despawn limit.
    pub fn due(&mut self, player_z: f32) -> Option<f32> {
        if player_z - self.last_player_z >= self.distance_behind {
            self.last_player_z = player_z;
            Some(player_z - self.distance_behind)
        } else {
            None
        }
    }
}

/// Common shape of the three spawner variants.
///
/// `update` is the per-tick entry point: spawning runs first, then the
/// gated despawn sweep, so a prop is never recycled in the same tick it
/// was placed ahead of the player.
pub trait Spawner {
    /// Positions the spawn cursors relative to the starting player
    /// position. Called once before the first `update`.
    fn initialize_spawning(&mut self, player_z: f32);

    /// Advances spawn cursors up to `player_z + spawn_distance_ahead`,
    /// activating pooled props along the way.
    fn handle_spawning(&mut self, player_z: f32);

    /// Deactivates every active prop with `position.z < z_limit`.
    fn despawn_behind(&mut self, z_limit: f32);

    fn sweep(&mut self) -> &mut DespawnSweep;

    fn update(&mut self, player_z: f32) {
        self.handle_spawning(player_z);
        if let Some(z_limit) = self.sweep().due(player_z) {
            self.despawn_behind(z_limit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_triggers_only_after_enough_travel() {
        let mut sweep = DespawnSweep::new(50.0, 0.0);
        assert_eq!(sweep.due(10.0), None);
        assert_eq!(sweep.due(49.9), None);
        assert_eq!(sweep.due(50.0), Some(0.0));
        // Re-arms from the new sweep position.
        assert_eq!(sweep.due(80.0), None);
        assert_eq!(sweep.due(100.0), Some(50.0));
    }
}
