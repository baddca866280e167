use thiserror::Error;

#[derive(Error, Debug)]
pub enum VesError {
    #[error("Mismatched array lengths: ab2={ab2}, rhoa={rhoa}")]
    MismatchedArrayLengths { ab2: usize, rhoa: usize },

    #[error("Invalid parameter vector: expected length {expected}, got {got}")]
    InvalidParameterVector { expected: usize, got: usize },

    #[error("Domain error: {0}")]
    DomainError(String),

    #[error("Optimization failure: {0}")]
    OptimizationFailure(String),

    #[error("Insufficient models for a 2-D section: got {count}, need at least 2")]
    InsufficientModels { count: usize },

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type VesResult<T> = Result<T, VesError>;
