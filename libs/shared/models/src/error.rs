use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error kinds surfaced by the clinic core to its callers.
///
/// Every kind is recoverable: the caller reports it and may retry with
/// corrected input.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClinicError {
    #[error("Duplicate identity: {0}")]
    DuplicateIdentity(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Slot unavailable: {0}")]
    SlotUnavailable(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ClinicError {
    /// Short label used by the shell when reporting the error.
    pub fn kind(&self) -> &'static str {
        match self {
            ClinicError::DuplicateIdentity(_) => "DuplicateIdentity",
            ClinicError::NotFound(_) => "NotFound",
            ClinicError::SlotUnavailable(_) => "SlotUnavailable",
            ClinicError::InvalidState(_) => "InvalidState",
            ClinicError::InvalidInput(_) => "InvalidInput",
        }
    }

    /// Logs the error at warn level.
    pub fn report(&self) {
        tracing::warn!("{}: {}", self.kind(), self);
    }
}

pub type ClinicResult<T> = Result<T, ClinicError>;
