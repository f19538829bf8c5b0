//! ASCII rendering of surfaces and worlds.
//!
//! The viewport is sampled on a regular grid, `resolution` characters per
//! unit on each axis. Rows are emitted top (largest y) first so the picture
//! reads the right way up.

use crate::simulation::geometry::{NPoint2, NVec2};
use crate::simulation::surface::Surface;
use crate::simulation::world::World;

const EMPTY: char = '.';
const FILLED: char = '#';

/// Rectangle of the plane to draw, from its bottom left to its top right corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub from: NPoint2,
    pub to: NPoint2,
    pub resolution: NVec2, // characters per unit
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            from: NPoint2::new(-1.0, -1.0),
            to: NPoint2::new(1.0, 1.0),
            resolution: NVec2::new(10.0, 5.0),
        }
    }
}

impl Viewport {
    pub fn columns(&self) -> usize {
        cells(self.to.x - self.from.x, self.resolution.x)
    }

    pub fn rows(&self) -> usize {
        cells(self.to.y - self.from.y, self.resolution.y)
    }

    /// Plane point sampled for column `i`, row `j` (row 0 at the bottom).
    pub fn sample(&self, i: usize, j: usize) -> NPoint2 {
        let extent = self.to - self.from;
        NPoint2::new(
            self.from.x + i as f64 * extent.x / self.columns() as f64,
            self.from.y + j as f64 * extent.y / self.rows() as f64,
        )
    }

    /// Draw a character per sample, top row first.
    pub fn render<F>(&self, mut pixel: F) -> String
    where
        F: FnMut(&NPoint2) -> char,
    {
        let (columns, rows) = (self.columns(), self.rows());
        let mut out = String::with_capacity((columns + 1) * rows);
        for j in (0..rows).rev() {
            for i in 0..columns {
                out.push(pixel(&self.sample(i, j)));
            }
            if j > 0 {
                out.push('\n');
            }
        }
        out
    }
}

fn cells(extent: f64, per_unit: f64) -> usize {
    let n = (extent * per_unit).round();
    if n.is_finite() && n > 0.0 {
        n as usize
    } else {
        0
    }
}

/// `#` inside the surface, `.` outside.
pub fn draw_surface(surface: &Surface, viewport: &Viewport) -> String {
    viewport.render(|p| if surface.point_is_inside(p) { FILLED } else { EMPTY })
}

/// First character of the name of the solid covering each sample.
pub fn draw_world(world: &World, viewport: &Viewport) -> String {
    viewport.render(|p| {
        world
            .solids()
            .find(|s| s.surface.point_is_inside(p))
            .map(|s| s.name().chars().next().unwrap_or(FILLED))
            .unwrap_or(EMPTY)
    })
}

impl Surface {
    pub fn draw(&self, viewport: &Viewport) -> String {
        draw_surface(self, viewport)
    }
}

impl World {
    pub fn draw(&self, viewport: &Viewport) -> String {
        draw_world(self, viewport)
    }
}
