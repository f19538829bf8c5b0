//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`UpdaterConfig`]    – time scale, step rate limit, history length
//! - [`ParametersConfig`] – numerical parameters (integration resolution)
//! - [`SolidConfig`]      – initial state and shape of each solid
//! - [`ViewConfig`]       – optional ASCII viewport
//! - [`RunConfig`]        – when to stop, how often to draw, slow motion
//! - [`ScenarioConfig`]   – top-level wrapper
//!
//! # YAML format
//!
//! ```yaml
//! updater:
//!   time_scale: 1.0
//!   max_steps_per_second: 1000.0
//!   history_length: 100
//!
//! parameters:
//!   nb_of_steps: 1000       # slices used to integrate area / barycenter
//!
//! solids:
//!   - name: wall
//!     origin: [0.0, 0.0]
//!     density: .inf         # immovable
//!     shape: { kind: circle, radius: 1.0 }
//!   - name: small
//!     origin: [4.0, 0.0]
//!     velocity: [0.0, 0.0]
//!     density: 1.0
//!     shape: { kind: circle, radius: 1.0 }
//!
//! view:
//!   from: [-2.0, -1.5]
//!   to: [12.0, 1.5]
//!   resolution: [10.0, 5.0]  # characters per unit
//!
//! run:
//!   stop_after_collisions: 31
//!   frame_interval_secs: 1.0
//!   slow_motion: { solid: small, factor: 10.0 }
//! ```

use serde::Deserialize;

use crate::simulation::surface::DEFAULT_STEPS;
use crate::simulation::updater::{
    DEFAULT_HISTORY_LENGTH, DEFAULT_MAX_STEPS_PER_SECOND, DEFAULT_TIME_SCALE,
};

/// Step scheduler settings
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct UpdaterConfig {
    pub time_scale: f64,           // simulated seconds per real second
    pub max_steps_per_second: f64, // throttle, `.inf` to disable
    pub history_length: usize,     // steps kept to compute steps/s and durations
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            time_scale: DEFAULT_TIME_SCALE,
            max_steps_per_second: DEFAULT_MAX_STEPS_PER_SECOND,
            history_length: DEFAULT_HISTORY_LENGTH,
        }
    }
}

/// Numerical parameters
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub nb_of_steps: usize, // integration slices per surface
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            nb_of_steps: DEFAULT_STEPS,
        }
    }
}

/// Shape of a solid, as a polar equation around its origin
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeConfig {
    Circle {
        radius: f64,
    },
    Square {
        half_side: f64,
    },
    Rectangle {
        half_width: f64,
        half_height: f64,
    },
    Ellipse {
        semi_x: f64,
        semi_y: f64,
    },
    RegularPolygon {
        circumradius: f64,
        sides: u32,
        #[serde(default)]
        rotation: f64,
    },
}

/// Initial state of a single solid
#[derive(Deserialize, Debug, Clone)]
pub struct SolidConfig {
    pub name: Option<String>,     // label, its first character is drawn
    pub origin: [f64; 2],         // origin of the polar equation
    #[serde(default)]
    pub velocity: [f64; 2],       // initial velocity
    pub density: f64,             // `.inf` for immovable solids
    pub restitution: Option<f64>, // 1.0 (elastic) when omitted
    pub shape: ShapeConfig,
}

/// ASCII viewport
#[derive(Deserialize, Debug, Clone)]
pub struct ViewConfig {
    pub from: [f64; 2], // bottom left corner
    pub to: [f64; 2],   // top right corner
    #[serde(default = "default_resolution")]
    pub resolution: [f64; 2], // characters per unit on each axis
}

fn default_resolution() -> [f64; 2] {
    [10.0, 5.0]
}

/// Time scale driven by the speed of one solid: `1 / (1 + |v| / factor)`
#[derive(Deserialize, Debug, Clone)]
pub struct SlowMotionConfig {
    pub solid: String,
    pub factor: f64,
}

/// Driver settings
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RunConfig {
    pub stop_after_collisions: Option<u64>,
    pub max_real_seconds: Option<f64>,
    pub frame_interval_secs: f64,
    pub slow_motion: Option<SlowMotionConfig>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            stop_after_collisions: None,
            max_real_seconds: None,
            frame_interval_secs: 1.0,
            slow_motion: None,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub updater: UpdaterConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    pub solids: Vec<SolidConfig>,
    pub view: Option<ViewConfig>,
    #[serde(default)]
    pub run: RunConfig,
}
