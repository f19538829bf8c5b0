//! Physical bodies: a surface with a density and a velocity.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Result, SimError};
use crate::simulation::geometry::{NPoint2, NVec2};
use crate::simulation::surface::{PolarEquation, Surface};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a solid, unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SolidId(u64);

impl SolidId {
    fn next() -> Self {
        SolidId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SolidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A rigid body moving at constant velocity between collisions.
///
/// `density` may be `+inf` for immovable bodies (walls). Mass and kinetic
/// energy are derived on every call; the surface already caches its area.
#[derive(Debug)]
pub struct Solid {
    id: SolidId,
    name: String,
    pub surface: Surface,
    density: f64,
    pub velocity: NVec2,
    restitution: f64,
}

impl Solid {
    /// Build a solid from its origin, density, initial velocity and shape.
    ///
    /// Fails on a negative or NaN density.
    pub fn new(
        origin: NPoint2,
        density: f64,
        velocity: NVec2,
        equation: impl PolarEquation + 'static,
    ) -> Result<Self> {
        Self::from_surface(Surface::new(origin, equation), density, velocity)
    }

    pub fn from_surface(surface: Surface, density: f64, velocity: NVec2) -> Result<Self> {
        if density.is_nan() || density < 0.0 {
            return Err(SimError::InvalidDensity(density));
        }

        let id = SolidId::next();
        Ok(Self {
            id,
            name: format!("solid-{}", id.get()),
            surface,
            density,
            velocity,
            restitution: 1.0,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the coefficient of restitution, `1` being perfectly elastic.
    pub fn with_restitution(mut self, restitution: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&restitution) {
            return Err(SimError::InvalidRestitution(restitution));
        }
        self.restitution = restitution;
        Ok(self)
    }

    pub fn id(&self) -> SolidId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    pub fn is_immovable(&self) -> bool {
        self.density.is_infinite()
    }

    /// `area × density`; `+inf` for immovable solids, whatever their area.
    pub fn mass(&self) -> f64 {
        if self.is_immovable() {
            return f64::INFINITY;
        }
        self.surface.area() * self.density
    }

    /// `m·|v|²/2`; an immovable body at rest carries none.
    pub fn kinetic_energy(&self) -> f64 {
        let speed2 = self.velocity.norm_squared();
        if speed2 == 0.0 {
            return 0.0;
        }
        self.mass() * speed2 / 2.0
    }

    /// `m·v`; an immovable body at rest carries none.
    pub fn momentum(&self) -> NVec2 {
        if self.velocity == NVec2::zeros() {
            return NVec2::zeros();
        }
        self.velocity * self.mass()
    }

    pub fn barycenter(&self) -> NPoint2 {
        self.surface.barycenter()
    }

    /// Shift the solid by `delta`.
    pub fn translate(&mut self, delta: &NVec2) {
        self.surface.translate(delta);
    }
}
