// File: src/error.rs
// Purpose: Server-side re-validation failures

/// Why a submission was rejected after it reached the server
///
/// Rendered as a single page-level banner; the details only go to the log.
#[derive(Debug, thiserror::Error)]
pub enum ServerValidationError {
    #[error("submitted fields failed validation: {0}")]
    Rejected(#[from] garde::Report),

    #[error("unknown department: {0:?}")]
    UnknownDepartment(String),
}

impl ServerValidationError {
    /// Names of the offending form fields
    pub fn fields(&self) -> Vec<String> {
        match self {
            ServerValidationError::Rejected(report) => {
                report.iter().map(|(path, _)| path.to_string()).collect()
            }
            ServerValidationError::UnknownDepartment(_) => vec!["department".to_string()],
        }
    }
}
