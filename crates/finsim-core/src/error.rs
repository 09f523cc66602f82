use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinsimError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl FinsimError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        FinsimError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for FinsimError {
    fn from(e: serde_json::Error) -> Self {
        FinsimError::SerializationError(e.to_string())
    }
}
