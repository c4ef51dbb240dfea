use thiserror::Error;

/// Rejected configuration. Returned before any state is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormationError {
    #[error("unknown shape kind `{0}`")]
    UnknownShape(String),
    #[error("{what} must be positive")]
    ZeroCount { what: &'static str },
    #[error("invalid color `{0}`, expected #rrggbb")]
    InvalidColor(String),
    #[error("particle size must be finite and positive, got {0}")]
    InvalidParticleSize(f32),
    #[error("minimum separation must be finite and positive, got {0}")]
    InvalidSeparation(f32),
}

pub type Result<T> = std::result::Result<T, FormationError>;
