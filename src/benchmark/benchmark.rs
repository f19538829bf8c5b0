use std::f64::consts::PI;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::simulation::geometry::{NPoint2, NVec2};
use crate::simulation::solid::Solid;
use crate::simulation::surface::{Circle, Rectangle, Surface};
use crate::simulation::updater::Updater;
use crate::simulation::world::World;

/// Accuracy and cost of the area integration as the slice count grows.
/// Paste output directly into a spreadsheet to graph
pub fn bench_integration() {
    println!("nb_of_steps,circle_error,square_error,micros");

    for nb_of_steps in [10, 50, 100, 500, 1000, 5000, 10000, 50000] {
        // fresh surfaces so nothing is served from the cache
        let circle = Surface::new(NPoint2::origin(), Circle { radius: 1.0 });
        let square = Surface::new(NPoint2::origin(), Rectangle::square(1.0));

        let t0 = Instant::now();
        let circle_area = circle.integrate(0.0, 2.0 * PI, nb_of_steps).area;
        let square_area = square.integrate(0.0, 2.0 * PI, nb_of_steps).area;
        let micros = t0.elapsed().as_secs_f64() * 1e6 / 2.0;

        println!(
            "{},{:.3e},{:.3e},{:.1}",
            nb_of_steps,
            (circle_area - PI).abs(),
            (square_area - 4.0).abs(),
            micros
        );
    }
}

/// Helper to build a grid of `n` unit circles drifting in every direction
fn make_world(n: usize) -> Result<World> {
    let mut world = World::with_updater(Updater::new(1.0, f64::INFINITY, 100)?);
    let side = (n as f64).sqrt().ceil() as usize;

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions and velocities, no rand needed
        let origin = NPoint2::new((i % side) as f64 * 3.0, (i / side) as f64 * 3.0);
        let velocity = NVec2::new((i_f * 0.37).sin(), (i_f * 0.13).cos());
        world.add_solid(Solid::new(origin, 1.0, velocity, Circle { radius: 1.0 })?);
    }

    Ok(world)
}

/// Cost of one updater step against the number of solids (O(n²) pairs)
pub fn bench_step_curve() -> Result<()> {
    println!("n,pairs,step_ms");

    for n in [2, 5, 10, 20, 40, 80, 160, 320] {
        let mut world = make_world(n)?;
        let steps = if n <= 40 { 200 } else { 10 };

        let mut clock = Instant::now();
        world.updater.start_at(clock);

        // warm-up: fills every surface's integration cache
        clock += Duration::from_millis(1);
        world.step_at(clock);

        let t0 = Instant::now();
        for _ in 0..steps {
            clock += Duration::from_millis(1);
            world.step_at(clock);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{},{:.6}", n, n * (n - 1) / 2, ms);
        world.updater.stop();
    }

    Ok(())
}
