/*
 * Boid Flocking Simulation
 *
 * Agents follow three local rules computed from neighbours found through a
 * spatial grid:
 * 1. Separation: move away from close neighbours
 * 2. Cohesion: move toward nearby neighbours
 * 3. Alignment: match the heading of very close neighbours
 *
 * Holding a mouse button pulls the flock toward the cursor, H steps the
 * simulation speed down, Q or Escape quits. Pass a JSON parameter file as the
 * first argument (or set GRIDFLOCK_CONFIG) to override the defaults. Set
 * RUST_LOG to control log output.
 */

use gridflock::app::{model, update};

fn main() {
    init_tracing();
    nannou::app(model).update(update).run();
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
