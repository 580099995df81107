use thiserror::Error;

/// Errors raised when setting up a simulation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NBodyError {
    #[error("failed to allocate particle buffer for {requested} slots")]
    Allocation { requested: usize },

    #[error("lane width must be at least 1, got {0}")]
    InvalidLaneWidth(usize),

    #[error("time step size must be finite and positive, got {0}")]
    InvalidTimeStep(f32),
}

pub type Result<T> = std::result::Result<T, NBodyError>;
