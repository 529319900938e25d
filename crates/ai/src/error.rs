use thiserror::Error;

/// Any failed generation call. Callers usually surface all of these the same
/// way ("generation failed"); the variants exist for logging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("generation service unreachable: {0}")]
    Transport(String),

    #[error("generation service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("generation output unusable: {0}")]
    UnusableOutput(String),

    #[error("generation request could not be encoded: {0}")]
    InvalidRequest(String),

    #[error("invalid generation config: {0}")]
    InvalidConfig(String),
}

pub type GenerationResult<T> = Result<T, GenerationError>;
