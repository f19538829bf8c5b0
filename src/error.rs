//! Error type shared by the simulation kernel and the scenario builder.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

/// Things which can go wrong while building solids, worlds and scenarios.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("density must be a non-negative number (or +inf), got {0}")]
    InvalidDensity(f64),

    #[error("restitution coefficient must lie in [0, 1], got {0}")]
    InvalidRestitution(f64),

    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("integration needs at least one step")]
    InvalidStepCount,

    #[error("invalid updater setting `{name}`: {value}")]
    InvalidUpdaterSetting { name: &'static str, value: f64 },

    #[error("no solid named `{0}` in the world")]
    UnknownSolid(String),

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
}
