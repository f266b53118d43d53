use thiserror::Error;

/// Unified error type for Portalog.
#[derive(Error, Debug)]
pub enum PortalogError {
    #[error("Required field empty: {0}")]
    InvalidInput(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Append failed (primary: {primary}; fallback: {fallback})")]
    WriteFailure { primary: String, fallback: String },

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl PortalogError {
    /// Map to an HTTP status code for the request-handling caller.
    ///
    /// The HTTP layer itself is out of scope here; this is the one hook it
    /// needs to turn a logging outcome into a response.
    pub fn status_code(&self) -> u16 {
        match self {
            PortalogError::InvalidInput(_) => 400,
            PortalogError::ProfileNotFound(_) => 404,
            PortalogError::WriteFailure { .. } => 500,
            PortalogError::Serde(_) => 500,
        }
    }
}
