//! Per-step progress line, printed from the driver's step callback

use std::time::Instant;

/// Prints one line per step and stops the run after `n_time_steps` steps
pub struct ProgressReporter {
    n_time_steps: usize,
    quiet: bool,
    wall_start: Instant,
    step_start: Instant,
}

impl ProgressReporter {
    pub fn new(n_time_steps: usize, quiet: bool) -> Self {
        let now = Instant::now();
        Self {
            n_time_steps,
            quiet,
            wall_start: now,
            step_start: now,
        }
    }

    /// Step callback: report, then continue while `steps < n_time_steps`
    pub fn on_step(&mut self, steps: usize, _elapsed: f32) -> bool {
        let now = Instant::now();
        if !self.quiet {
            let wall = now.duration_since(self.wall_start).as_secs_f64();
            let step = now.duration_since(self.step_start).as_secs_f64();
            println!(
                "[{:3}%] wall-time: {}s, time-step time: {:e}s",
                percent(steps, self.n_time_steps),
                wall,
                step
            );
        }
        self.step_start = now;
        steps < self.n_time_steps
    }
}

/// Share of the requested steps completed, as a whole percentage
pub fn percent(steps: usize, n_time_steps: usize) -> u32 {
    if n_time_steps == 0 {
        return 100;
    }
    (100.0 * steps as f64 / n_time_steps as f64) as u32
}
