use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("diagnosis text must not be blank")]
    BlankDiagnosis,

    #[error("confidence {0} is outside range [1, 5]")]
    ConfidenceOutOfRange(u8),

    #[error("entry index {index} out of range for differential of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
}
