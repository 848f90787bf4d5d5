//! Input - Per-tick throttle/brake pair
//!
//! The input collaborator (keyboard, gamepad, AI) fills one of these
//! each frame and hands it to `Simulation::tick`. Upstream is trusted
//! but not verified, so values are clamped at the boundary.

use serde::{Deserialize, Serialize};

/// Throttle and brake, both in [0, 1].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Controls {
    pub throttle: f32,
    pub brake: f32,
}

impl Controls {
    /// Full throttle, no brake.
    pub fn full_throttle() -> Self {
        Self { throttle: 1.0, brake: 0.0 }
    }

    /// Full brake, no throttle.
    pub fn full_brake() -> Self {
        Self { throttle: 0.0, brake: 1.0 }
    }

    /// Returns a copy with both values clamped to [0, 1].
    pub fn clamped(self) -> Self {
        Self {
            throttle: self.throttle.clamp(0.0, 1.0),
            brake: self.brake.clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_input() {
        let c = Controls { throttle: 1.7, brake: -0.4 }.clamped();
        assert_eq!(c.throttle, 1.0);
        assert_eq!(c.brake, 0.0);
    }
}
