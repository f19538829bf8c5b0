//! # Polar surfaces
//!
//! A [`Surface`] is a region of the plane described from an origin point by a
//! polar equation `r = f(θ)`: the boundary sits at distance `f(θ)` from the
//! origin in direction `θ`. Every such region is star-convex from its origin.
//!
//! ## Integration
//!
//! Area and barycenter are obtained by slicing `[from, to)` into `n` equal
//! sub-angles of width `δ` and summing one triangle per slice:
//!
//! - the triangle spanned by the radius vectors `v(θ)` and `v(θ+δ)` has area
//!   `r(θ)·r(θ+δ)·sin(δ)/2`,
//! - its centroid is `(v(θ) + v(θ+δ)) / 3` (the third vertex is the origin),
//! - weighting each centroid by its triangle area and dividing the sum by the
//!   total area gives the barycenter relative to the origin ("baryvector").
//!
//! The triangles are exact for straight edges and converge to the curved
//! boundary as `δ → 0`. The number of slices is the only precision knob; no
//! error bound is computed.
//!
//! Results are memoized per surface, keyed on `(from, to, n)`. The polar
//! equation never changes after construction and integrals are relative to the
//! origin, so translating a surface keeps its cache valid.

use std::cell::RefCell;
use std::collections::HashMap;
use std::f64::consts::{PI, TAU};
use std::fmt;
use std::rc::Rc;

use crate::error::{Result, SimError};
use crate::simulation::geometry::{from_polar, NPoint2, NVec2, PolarAngle};

/// Number of slices used when no explicit resolution is given.
pub const DEFAULT_STEPS: usize = 1000;

/// Boundary of a shape: radius as a function of angle.
///
/// Implementations should be pure, non-negative and `2π`-periodic.
pub trait PolarEquation {
    fn radius(&self, angle: f64) -> f64;
}

impl<F> PolarEquation for F
where
    F: Fn(f64) -> f64,
{
    fn radius(&self, angle: f64) -> f64 {
        self(angle)
    }
}

/// Positive and finite, or an `InvalidShape` error naming the dimension.
fn dimension(name: &str, value: f64) -> Result<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::InvalidShape(format!("{name} must be positive, got {value}")))
    }
}

/// Disc of constant radius.
///
/// The shape structs below keep public fields; building them directly skips
/// the checks done by their `new` constructors.
#[derive(Debug, Clone, Copy)]
pub struct Circle {
    pub radius: f64,
}

impl Circle {
    pub fn new(radius: f64) -> Result<Self> {
        Ok(Self {
            radius: dimension("radius", radius)?,
        })
    }
}

impl PolarEquation for Circle {
    fn radius(&self, _angle: f64) -> f64 {
        self.radius
    }
}

/// Axis-aligned rectangle centered on the origin.
#[derive(Debug, Clone, Copy)]
pub struct Rectangle {
    pub half_width: f64,
    pub half_height: f64,
}

impl Rectangle {
    pub fn new(half_width: f64, half_height: f64) -> Result<Self> {
        Ok(Self {
            half_width: dimension("half_width", half_width)?,
            half_height: dimension("half_height", half_height)?,
        })
    }

    /// Square with the given half side; `square(1.0)` has area 4.
    pub fn square(half_side: f64) -> Self {
        Self {
            half_width: half_side,
            half_height: half_side,
        }
    }
}

impl PolarEquation for Rectangle {
    fn radius(&self, angle: f64) -> f64 {
        let (sin, cos) = angle.sin_cos();
        // division by zero gives +inf, which min() discards
        (self.half_width / cos).abs().min((self.half_height / sin).abs())
    }
}

/// Axis-aligned ellipse centered on the origin.
#[derive(Debug, Clone, Copy)]
pub struct Ellipse {
    pub semi_x: f64,
    pub semi_y: f64,
}

impl Ellipse {
    pub fn new(semi_x: f64, semi_y: f64) -> Result<Self> {
        Ok(Self {
            semi_x: dimension("semi_x", semi_x)?,
            semi_y: dimension("semi_y", semi_y)?,
        })
    }
}

impl PolarEquation for Ellipse {
    fn radius(&self, angle: f64) -> f64 {
        let (sin, cos) = angle.sin_cos();
        let (a, b) = (self.semi_x, self.semi_y);
        a * b / ((b * cos).powi(2) + (a * sin).powi(2)).sqrt()
    }
}

/// Regular polygon inscribed in a circle of radius `circumradius`, with a
/// vertex at angle `rotation`.
#[derive(Debug, Clone, Copy)]
pub struct RegularPolygon {
    pub circumradius: f64,
    pub sides: u32,
    pub rotation: f64,
}

impl RegularPolygon {
    /// Fails on fewer than 3 sides, a non-positive circumradius or a
    /// non-finite rotation.
    pub fn new(circumradius: f64, sides: u32, rotation: f64) -> Result<Self> {
        if sides < 3 {
            return Err(SimError::InvalidShape(format!(
                "a regular polygon needs at least 3 sides, got {sides}"
            )));
        }
        if !rotation.is_finite() {
            return Err(SimError::InvalidShape(format!("rotation must be finite, got {rotation}")));
        }
        Ok(Self {
            circumradius: dimension("circumradius", circumradius)?,
            sides,
            rotation,
        })
    }
}

impl PolarEquation for RegularPolygon {
    fn radius(&self, angle: f64) -> f64 {
        let sector = TAU / self.sides as f64;
        let half = sector / 2.0;
        let local = (angle - self.rotation).rem_euclid(sector);
        self.circumradius * half.cos() / (local - half).cos()
    }
}

/// Area and area-weighted centroid (relative to the origin) of a slice of a
/// surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integral {
    pub area: f64,
    pub baryvector: NVec2,
}

/// Cache key: exact bit patterns of the bounds plus the slice count.
type IntegrationKey = (u64, u64, usize);

/// A region of the plane bounded by a polar equation around `origin`.
#[derive(Clone)]
pub struct Surface {
    pub origin: NPoint2,
    equation: Rc<dyn PolarEquation>,
    nb_of_steps: usize,
    cache: RefCell<HashMap<IntegrationKey, Integral>>,
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("origin", &self.origin)
            .field("nb_of_steps", &self.nb_of_steps)
            .field("cached_integrals", &self.cache.borrow().len())
            .finish()
    }
}

impl Surface {
    pub fn new(origin: NPoint2, equation: impl PolarEquation + 'static) -> Self {
        Self::from_shared(origin, Rc::new(equation))
    }

    /// Build a surface around an equation already shared with other surfaces.
    pub fn from_shared(origin: NPoint2, equation: Rc<dyn PolarEquation>) -> Self {
        Self {
            origin,
            equation,
            nb_of_steps: DEFAULT_STEPS,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Use `nb_of_steps` slices for [`Surface::area`] and
    /// [`Surface::barycenter`].
    pub fn with_resolution(mut self, nb_of_steps: usize) -> Result<Self> {
        if nb_of_steps == 0 {
            return Err(SimError::InvalidStepCount);
        }
        self.nb_of_steps = nb_of_steps;
        Ok(self)
    }

    pub fn nb_of_steps(&self) -> usize {
        self.nb_of_steps
    }

    /// Boundary radius in direction `angle`.
    pub fn radius(&self, angle: f64) -> f64 {
        self.equation.radius(angle)
    }

    /// Area of the whole surface.
    pub fn area(&self) -> f64 {
        self.integrate(0.0, TAU, self.nb_of_steps).area
    }

    /// Area-weighted centroid, in world coordinates.
    pub fn barycenter(&self) -> NPoint2 {
        self.origin + self.integrate(0.0, TAU, self.nb_of_steps).baryvector
    }

    /// Area of the angular slice `[from, to)`.
    pub fn integral(&self, from: f64, to: f64) -> f64 {
        self.integrate(from, to, self.nb_of_steps).area
    }

    /// Centroid of the angular slice `[from, to)`, relative to the origin.
    pub fn baryvector(&self, from: f64, to: f64) -> NVec2 {
        self.integrate(from, to, self.nb_of_steps).baryvector
    }

    /// Integrate the slice `[from, to)` with `nb_of_steps` triangles.
    ///
    /// A slice of zero area has a zero baryvector.
    ///
    /// # Panics
    /// If `nb_of_steps` is zero.
    pub fn integrate(&self, from: f64, to: f64, nb_of_steps: usize) -> Integral {
        assert!(nb_of_steps > 0, "integration needs at least one step");

        let key = (from.to_bits(), to.to_bits(), nb_of_steps);
        if let Some(hit) = self.cache.borrow().get(&key) {
            return *hit;
        }

        let integral = self.sum_triangles(from, to, nb_of_steps);
        self.cache.borrow_mut().insert(key, integral);
        integral
    }

    fn sum_triangles(&self, from: f64, to: f64, nb_of_steps: usize) -> Integral {
        let delta = (to - from) / nb_of_steps as f64;
        let sin_delta = delta.sin();

        let mut area = 0.0;
        let mut weighted = NVec2::zeros();

        let mut r0 = self.radius(from);
        for step in 0..nb_of_steps {
            let angle = from + step as f64 * delta;
            let next = angle + delta;
            let r1 = self.radius(next);

            let a = r0 * r1 * sin_delta / 2.0;
            weighted += (from_polar(r0, angle) + from_polar(r1, next)) * (a / 3.0);
            area += a;

            r0 = r1;
        }

        let baryvector = if area != 0.0 {
            weighted / area
        } else {
            NVec2::zeros()
        };

        Integral { area, baryvector }
    }

    /// Whether `point` lies inside or on the boundary.
    pub fn point_is_inside(&self, point: &NPoint2) -> bool {
        let offset = *point - self.origin;
        match offset.try_angle() {
            Some(angle) => self.radius(angle) >= offset.norm(),
            None => true,
        }
    }

    /// Whether two surfaces overlap along the line joining their origins.
    ///
    /// Only the line of centers is tested: the sum of both radii facing each
    /// other must reach the distance between origins. Surfaces sharing an
    /// origin always intersect.
    pub fn intersect(s1: &Surface, s2: &Surface) -> bool {
        let between = s2.origin - s1.origin;
        match between.try_angle() {
            Some(angle) => {
                let facing = (angle + PI).rem_euclid(TAU);
                s1.radius(angle) + s2.radius(facing) >= between.norm()
            }
            None => true,
        }
    }

    /// Move the origin; the shape itself is unchanged.
    pub fn translate(&mut self, delta: &NVec2) {
        self.origin += *delta;
    }
}
