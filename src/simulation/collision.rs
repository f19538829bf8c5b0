//! Collision detection and resolution between pairs of solids.
//!
//! Detection is two-phase:
//! 1. the surfaces must intersect along their line of centers
//!    ([`Surface::intersect`]),
//! 2. the bodies must be closing on at least one axis: the body whose
//!    barycenter is strictly lower on that axis must be strictly faster on it.
//!
//! Overlapping bodies that are already separating are left alone, so a pair
//! can stay geometrically intersecting after a bounce without bouncing again.
//!
//! Resolution treats x and y as two independent 1-D collisions. With a
//! restitution of 1 (the default) both kinetic energy and momentum are
//! conserved; an infinite mass acts as a wall that reflects the other body.

use log::warn;

use crate::simulation::solid::Solid;
use crate::simulation::surface::Surface;

/// Axes on which a pair of solids is closing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClosingAxes {
    pub x: bool,
    pub y: bool,
}

impl ClosingAxes {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Closing test on one axis, from barycenter coordinates `c` and velocity
/// components `u`. Equal coordinates never close.
fn closing(c1: f64, c2: f64, u1: f64, u2: f64) -> bool {
    if c1 < c2 {
        u1 > u2
    } else if c2 < c1 {
        u2 > u1
    } else {
        false
    }
}

/// Axes on which `s1` and `s2` are colliding, or `None` if they are not.
pub fn detect(s1: &Solid, s2: &Solid) -> Option<ClosingAxes> {
    if !Surface::intersect(&s1.surface, &s2.surface) {
        return None;
    }

    let c1 = s1.barycenter();
    let c2 = s2.barycenter();
    let axes = ClosingAxes {
        x: closing(c1.x, c2.x, s1.velocity.x, s2.velocity.x),
        y: closing(c1.y, c2.y, s1.velocity.y, s2.velocity.y),
    };

    axes.any().then_some(axes)
}

/// New velocity components after a 1-D collision with restitution `e`.
fn exchange(m1: f64, m2: f64, u1: f64, u2: f64, e: f64) -> (f64, f64) {
    match (m1.is_infinite(), m2.is_infinite()) {
        (false, false) => {
            // massless pairs behave like equal masses
            let (m1, m2) = if m1 + m2 == 0.0 { (1.0, 1.0) } else { (m1, m2) };
            let total = m1 + m2;
            let momentum = m1 * u1 + m2 * u2;
            (
                (momentum + m2 * e * (u2 - u1)) / total,
                (momentum + m1 * e * (u1 - u2)) / total,
            )
        }
        (true, false) => (u1, -e * u2),
        (false, true) => (-e * u1, u2),
        (true, true) => (u1, u2),
    }
}

/// Update the velocities of `s1` and `s2` on the given axes.
///
/// Pair order does not matter: `resolve(a, b)` and `resolve(b, a)` produce
/// the same velocities.
pub fn resolve(s1: &mut Solid, s2: &mut Solid, axes: ClosingAxes) {
    if s1.is_immovable() && s2.is_immovable() {
        warn!("collision between two immovable solids {} and {} ignored", s1.id(), s2.id());
        return;
    }

    let m1 = s1.mass();
    let m2 = s2.mass();
    let e = s1.restitution().min(s2.restitution());

    if axes.x {
        let (v1, v2) = exchange(m1, m2, s1.velocity.x, s2.velocity.x, e);
        s1.velocity.x = v1;
        s2.velocity.x = v2;
    }
    if axes.y {
        let (v1, v2) = exchange(m1, m2, s1.velocity.y, s2.velocity.y, e);
        s1.velocity.y = v1;
        s2.velocity.y = v2;
    }
}

/// Detect and resolve a collision between `s1` and `s2`.
///
/// Returns whether the pair collided; a pair that did not is left untouched.
pub fn check_for_collision(s1: &mut Solid, s2: &mut Solid) -> bool {
    match detect(s1, s2) {
        Some(axes) => {
            resolve(s1, s2, axes);
            true
        }
        None => false,
    }
}
