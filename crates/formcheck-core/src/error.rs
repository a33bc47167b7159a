// File: src/error.rs
// Purpose: Error taxonomy for identifier checks and validator configuration

/// Why a national or tax identifier was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("identifier has an invalid format")]
    Format,

    #[error("invalid department/municipality code {department:02}/{municipality:02}")]
    Range { department: u8, municipality: u8 },

    #[error("identifier check digit does not match")]
    Checksum,
}

/// Developer-facing problems that abort a whole-form pass
///
/// These are logged, never rendered as a field error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("page context marker not found")]
    MissingPageContext,

    #[error("no rules registered for page: {0}")]
    UnknownPage(String),

    #[error("form not found: {0}")]
    FormNotFound(String),
}
