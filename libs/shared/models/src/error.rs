use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl AppError {
    /// Process exit code for command-line callers. Validation failures are
    /// expected outcomes and map to 1; everything else is an operational
    /// failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::ValidationError(_) => 1,
            AppError::BadRequest(_) | AppError::Io(_) | AppError::Parse(_) => 2,
        }
    }
}
