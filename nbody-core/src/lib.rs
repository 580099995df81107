pub mod config;
pub mod driver;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod scenario;
pub mod store;

pub use config::SimulationConfig;
pub use driver::{run_simulation, RunSummary, StepLimit, StepObserver};
pub use error::{NBodyError, Result};
pub use forces::{
    accumulate_forces, pair_force, ForceKernel, KernelChoice, LaneKernel, ScalarKernel, LANES,
};
pub use integrator::{drift, kick, step};
pub use scenario::Scenario;
pub use store::{padded_len, Field, FieldsMut, ParticleInit, ParticleStore, LANE_WIDTH};
