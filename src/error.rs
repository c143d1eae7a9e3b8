use thiserror::Error;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Failed to parse journal data: {0}")]
    Parse(String),

    #[error("Invalid {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot checksum mismatch (expected {expected}, found {actual})")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),
}

impl JournalError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        JournalError::InvalidField {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for JournalError {
    fn from(err: serde_json::Error) -> Self {
        JournalError::Parse(err.to_string())
    }
}
