//! Time-stepping loop.
//!
//! The loop always runs at least one step, then asks the observer whether to
//! keep going. There is no other way to stop it.

use crate::forces::ForceKernel;
use crate::integrator::step;
use crate::store::ParticleStore;

/// Notified after every completed step; returns whether to continue
pub trait StepObserver {
    fn on_step(&mut self, steps: usize, elapsed: f32) -> bool;
}

impl<F> StepObserver for F
where
    F: FnMut(usize, f32) -> bool,
{
    fn on_step(&mut self, steps: usize, elapsed: f32) -> bool {
        self(steps, elapsed)
    }
}

/// Continue while fewer than `limit` steps have completed.
///
/// A limit of zero still lets the first step through, since the loop checks
/// only after stepping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepLimit {
    pub limit: usize,
}

impl StepLimit {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl StepObserver for StepLimit {
    fn on_step(&mut self, steps: usize, _elapsed: f32) -> bool {
        steps < self.limit
    }
}

/// Where the loop stopped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub elapsed: f32,
}

/// Integrate until `observer` returns false
pub fn run_simulation<K, O>(
    store: &mut ParticleStore,
    dt: f32,
    kernel: &K,
    mut observer: O,
) -> RunSummary
where
    K: ForceKernel + ?Sized,
    O: StepObserver,
{
    let mut elapsed = 0.0f32;
    let mut steps = 0usize;

    loop {
        step(store, dt, kernel);
        steps += 1;
        elapsed += dt;
        log::trace!("step {} done, t = {}", steps, elapsed);

        if !observer.on_step(steps, elapsed) {
            break;
        }
    }

    log::debug!(
        "simulation stopped after {} steps, simulated time {}",
        steps,
        elapsed
    );

    RunSummary { steps, elapsed }
}
