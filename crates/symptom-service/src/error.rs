//! Service error type.

use symptom_loader::LoadError;
use symptom_types::ProfileError;
use thiserror::Error;

/// Errors surfaced by the condition check service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Reference data could not be loaded.
    #[error("Failed to load reference data: {0}")]
    Load(#[from] LoadError),

    /// A check request could not be parsed.
    #[error("Invalid check request: {0}")]
    Request(#[from] serde_json::Error),

    /// I/O error reading a request.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The patient profile is out of range.
    #[error("Invalid patient profile: {0}")]
    Profile(#[from] ProfileError),
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
