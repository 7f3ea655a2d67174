use thiserror::Error;

/// Everything that can go wrong in the kinematic core.
///
/// Boundary crossings are not errors; bodies leave the arena every tick and
/// the policies in [`crate::boundary`] handle that.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
