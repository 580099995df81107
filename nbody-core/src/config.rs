use crate::error::{NBodyError, Result};
use crate::forces::KernelChoice;

pub const DEFAULT_NUM_PARTICLES: usize = 100;
pub const DEFAULT_N_TIME_STEPS: usize = 100;
pub const DEFAULT_TIME_STEP_SIZE: f32 = 0.05;

/// Parameters of one simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub num_particles: usize,
    pub n_time_steps: usize,
    pub time_step_size: f32,
    /// Seed for the initial layout; `None` draws one from the OS
    pub seed: Option<u64>,
    pub kernel: KernelChoice,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_particles: DEFAULT_NUM_PARTICLES,
            n_time_steps: DEFAULT_N_TIME_STEPS,
            time_step_size: DEFAULT_TIME_STEP_SIZE,
            seed: None,
            kernel: KernelChoice::default(),
        }
    }
}

impl SimulationConfig {
    /// Reject step sizes the integrator cannot make progress with.
    ///
    /// Zero particles and zero steps are both allowed.
    pub fn validate(&self) -> Result<()> {
        let dt = self.time_step_size;
        if !dt.is_finite() || dt <= 0.0 {
            return Err(NBodyError::InvalidTimeStep(dt));
        }
        Ok(())
    }
}
