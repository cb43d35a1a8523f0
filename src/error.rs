use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    /// Bad construction input: bounds, starting positions or probabilities.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Partition bookkeeping disagrees with particle state. Always an engine bug.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
