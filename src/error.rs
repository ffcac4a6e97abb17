use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    /// The buffer is too short to safely read a required field. Truncated
    /// and malformed inputs are not distinguished.
    #[error("Insufficient data to determine dimensions")]
    InsufficientData,

    #[error("No registered format matches the buffer")]
    UnknownFormat,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProbeError>;
