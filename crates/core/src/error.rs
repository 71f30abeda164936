use thiserror::Error;

/// Error taxonomy for the triage engine.
///
/// Every variant is recoverable for the caller: validation and duplicate
/// errors mean "fix the request", empty-queue is an expected condition,
/// and classification failures are retry-safe because the submission is
/// aborted before any queue mutation.
#[derive(Error, Debug)]
pub enum TriageError {
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("patient already queued: {0}")]
    DuplicatePatient(String),

    #[error("queue is empty")]
    EmptyQueue,

    #[error("classification failed: {0}")]
    Classification(String),
}

impl TriageError {
    /// Shorthand for a field-level validation failure.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        TriageError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
