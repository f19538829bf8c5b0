//! Runtime settings of the scenario driver
//!
//! `RunSettings` decides when a run ends, how often a frame is reported and
//! how the time scale follows the speed of one solid.

use std::time::Duration;

use crate::simulation::solid::SolidId;

/// Slow the simulation down as `solid` speeds up:
/// `time_scale = 1 / (1 + |v| / factor)`
#[derive(Debug, Clone, Copy)]
pub struct SlowMotion {
    pub solid: SolidId,
    pub factor: f64,
}

impl SlowMotion {
    pub fn time_scale(&self, speed: f64) -> f64 {
        1.0 / (1.0 + speed.abs() / self.factor)
    }
}

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub stop_after_collisions: Option<u64>, // end once this many collisions happened
    pub max_real_time: Option<Duration>,    // end after this much wall-clock time
    pub frame_interval: Duration,           // time between two reported frames
    pub slow_motion: Option<SlowMotion>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            stop_after_collisions: None,
            max_real_time: None,
            frame_interval: Duration::from_secs(1),
            slow_motion: None,
        }
    }
}
