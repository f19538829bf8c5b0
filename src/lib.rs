pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;
pub mod error;
pub mod logging;

pub use error::{Result, SimError};

pub use simulation::geometry::{NPoint2, NVec2, PolarAngle};
pub use simulation::surface::{Circle, Ellipse, Integral, PolarEquation, Rectangle, RegularPolygon, Surface};
pub use simulation::solid::{Solid, SolidId};
pub use simulation::collision::{check_for_collision, detect, resolve, ClosingAxes};
pub use simulation::updater::{StepHistory, StepOutcome, StepRecord, Updater};
pub use simulation::world::World;
pub use simulation::params::{RunSettings, SlowMotion};
pub use simulation::scenario::{Progress, RunReport, Scenario};

pub use configuration::config::{ParametersConfig, RunConfig, ScenarioConfig, ShapeConfig, SolidConfig, UpdaterConfig, ViewConfig};

pub use visualization::ascii::{draw_surface, draw_world, Viewport};

pub use benchmark::benchmark::{bench_integration, bench_step_curve};
