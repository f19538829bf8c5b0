//! Plane geometry primitives.
//!
//! Points and vectors are nalgebra types. A point is a coordinate, a vector is
//! either a free displacement/velocity or the difference of two points
//! (`to - from`). Addition, subtraction and scaling come from nalgebra's
//! operators; this module adds the polar angle the surfaces are indexed by.

use std::f64::consts::{PI, TAU};

use nalgebra::{Point2, Vector2};

pub type NVec2 = Vector2<f64>;
pub type NPoint2 = Point2<f64>;

/// Direction of a vector, counter-clockwise from the positive x-axis.
pub trait PolarAngle {
    /// Angle in `[0, 2π)`, or `None` for the zero vector.
    fn try_angle(&self) -> Option<f64>;

    /// Angle in `[0, 2π)`.
    ///
    /// # Panics
    /// On the zero vector, whose direction is undefined. Callers that may hold
    /// a zero vector should use [`PolarAngle::try_angle`].
    fn angle(&self) -> f64 {
        match self.try_angle() {
            Some(angle) => angle,
            None => panic!("angle of the zero vector is undefined"),
        }
    }
}

impl PolarAngle for NVec2 {
    fn try_angle(&self) -> Option<f64> {
        let (x, y) = (self.x, self.y);
        if x == 0.0 && y == 0.0 {
            return None;
        }

        // quadrant by quadrant, each branch on a positive atan argument
        let angle = if x > 0.0 && y >= 0.0 {
            (y / x).atan()
        } else if x <= 0.0 && y > 0.0 {
            PI / 2.0 + (-x / y).atan()
        } else if x < 0.0 && y <= 0.0 {
            PI + (y / x).atan()
        } else {
            3.0 * PI / 2.0 + (x / -y).atan()
        };

        // atan can round a tiny negative offset up to a full turn
        Some(if angle >= TAU { 0.0 } else { angle })
    }
}

/// Vector from the origin to polar coordinates `(radius, angle)`.
pub fn from_polar(radius: f64, angle: f64) -> NVec2 {
    let (sin, cos) = angle.sin_cos();
    NVec2::new(radius * cos, radius * sin)
}
