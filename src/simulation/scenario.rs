//! Build runnable scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a `Scenario`:
//! - the world with every solid at its initial state and a configured updater
//! - the driver settings (`RunSettings`)
//! - an optional ASCII viewport
//!
//! `Scenario::run` is the cooperative driver: it lets the world step and, in
//! between steps, adjusts the time scale, checks the stop conditions and
//! reports frames.

use std::rc::Rc;
use std::time::{Duration, Instant};

use log::warn;

use crate::configuration::config::{ScenarioConfig, ShapeConfig, SolidConfig};
use crate::error::{Result, SimError};
use crate::simulation::geometry::{NPoint2, NVec2};
use crate::simulation::params::{RunSettings, SlowMotion};
use crate::simulation::solid::Solid;
use crate::simulation::surface::{
    Circle, Ellipse, PolarEquation, Rectangle, RegularPolygon, Surface,
};
use crate::simulation::updater::Updater;
use crate::simulation::world::World;
use crate::visualization::ascii::Viewport;

pub struct Scenario {
    pub world: World,
    pub settings: RunSettings,
    pub view: Option<Viewport>,
}

/// Snapshot handed to the frame callback.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    pub frame: u64,
    pub collisions: u64,
    pub collisions_since_last_frame: u64,
    pub steps_per_second: Option<f64>,
    pub average_step_duration: Option<Duration>,
    pub time_scale: f64,
    pub real_time: Duration,
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy)]
pub struct RunReport {
    pub frames: u64,
    pub collisions: u64,
    pub simulated_secs: f64,
    pub real_time: Duration,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        // Updater (runtime) from UpdaterConfig
        let u_cfg = &cfg.updater;
        let updater = Updater::new(u_cfg.time_scale, u_cfg.max_steps_per_second, u_cfg.history_length)?;
        let mut world = World::with_updater(updater);

        // Solids: map `SolidConfig` -> runtime `Solid`
        for (i, sc) in cfg.solids.iter().enumerate() {
            let solid = build_solid(sc, cfg.parameters.nb_of_steps)
                .map_err(|err| SimError::InvalidScenario(format!("solid #{i}: {err}")))?;
            world.add_solid(solid);
        }

        let r_cfg = &cfg.run;
        let slow_motion = match &r_cfg.slow_motion {
            Some(sm) => {
                if sm.factor.is_nan() || sm.factor <= 0.0 {
                    return Err(SimError::InvalidScenario(format!(
                        "slow motion factor must be positive, got {}",
                        sm.factor
                    )));
                }
                let solid = world
                    .find_by_name(&sm.solid)
                    .ok_or_else(|| SimError::UnknownSolid(sm.solid.clone()))?;
                Some(SlowMotion {
                    solid: solid.id(),
                    factor: sm.factor,
                })
            }
            None => None,
        };

        let settings = RunSettings {
            stop_after_collisions: r_cfg.stop_after_collisions,
            max_real_time: r_cfg.max_real_seconds.map(secs_to_duration).transpose()?,
            frame_interval: secs_to_duration(r_cfg.frame_interval_secs)?,
            slow_motion,
        };

        let view = cfg.view.as_ref().map(|v| Viewport {
            from: NPoint2::new(v.from[0], v.from[1]),
            to: NPoint2::new(v.to[0], v.to[1]),
            resolution: NVec2::new(v.resolution[0], v.resolution[1]),
        });

        Ok(Self {
            world,
            settings,
            view,
        })
    }

    /// Run until a stop condition is met, calling `on_frame` every
    /// `frame_interval`. Without any stop condition the run only ends when
    /// `on_frame` stops the updater.
    pub fn run<F>(&mut self, mut on_frame: F) -> RunReport
    where
        F: FnMut(&mut World, &Progress),
    {
        let settings = self.settings.clone();
        let started = Instant::now();
        let mut last_frame = started;
        let mut frames = 0;
        let mut collisions_at_last_frame = 0;

        self.world.run(|world, _outcome| {
            if let Some(slow) = settings.slow_motion {
                if let Some(speed) = world.solid(slow.solid).map(|s| s.velocity.norm()) {
                    if let Err(err) = world.updater.set_time_scale(slow.time_scale(speed)) {
                        warn!("slow motion disabled for this step: {err}");
                    }
                }
            }

            let collisions = world.updater.total_collisions();
            let reached_collisions = settings
                .stop_after_collisions
                .is_some_and(|target| collisions >= target);
            let out_of_time = settings
                .max_real_time
                .is_some_and(|limit| started.elapsed() >= limit);

            if last_frame.elapsed() >= settings.frame_interval || reached_collisions || out_of_time {
                frames += 1;
                last_frame = Instant::now();
                let progress = Progress {
                    frame: frames,
                    collisions,
                    collisions_since_last_frame: collisions - collisions_at_last_frame,
                    steps_per_second: world.updater.steps_per_second(),
                    average_step_duration: world.updater.average_step_duration(),
                    time_scale: world.updater.time_scale(),
                    real_time: started.elapsed(),
                };
                collisions_at_last_frame = collisions;
                on_frame(world, &progress);
            }

            if reached_collisions || out_of_time {
                world.updater.stop();
            }
        });

        RunReport {
            frames,
            collisions: self.world.updater.total_collisions(),
            simulated_secs: self.world.updater.simulated_time(),
            real_time: started.elapsed(),
        }
    }
}

fn secs_to_duration(secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs)
        .map_err(|_| SimError::InvalidScenario(format!("invalid duration: {secs} s")))
}

fn build_solid(sc: &SolidConfig, nb_of_steps: usize) -> Result<Solid> {
    let origin = NPoint2::new(sc.origin[0], sc.origin[1]);
    let velocity = NVec2::new(sc.velocity[0], sc.velocity[1]);

    let surface = Surface::from_shared(origin, build_shape(&sc.shape)?).with_resolution(nb_of_steps)?;
    let mut solid = Solid::from_surface(surface, sc.density, velocity)?;

    if let Some(name) = &sc.name {
        solid = solid.with_name(name.clone());
    }
    if let Some(restitution) = sc.restitution {
        solid = solid.with_restitution(restitution)?;
    }
    Ok(solid)
}

fn build_shape(shape: &ShapeConfig) -> Result<Rc<dyn PolarEquation>> {
    let equation: Rc<dyn PolarEquation> = match *shape {
        ShapeConfig::Circle { radius } => Rc::new(Circle::new(radius)?),
        ShapeConfig::Square { half_side } => Rc::new(Rectangle::new(half_side, half_side)?),
        ShapeConfig::Rectangle {
            half_width,
            half_height,
        } => Rc::new(Rectangle::new(half_width, half_height)?),
        ShapeConfig::Ellipse { semi_x, semi_y } => Rc::new(Ellipse::new(semi_x, semi_y)?),
        ShapeConfig::RegularPolygon {
            circumradius,
            sides,
            rotation,
        } => Rc::new(RegularPolygon::new(circumradius, sides, rotation)?),
    };
    Ok(equation)
}
