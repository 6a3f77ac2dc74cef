use thiserror::Error;

use crate::repository::errors::RepositoryError;
use crate::uploads::UploadError;

pub mod favorites;
pub mod main;
pub mod products;

/// Result type returned by the service layer.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors produced while fulfilling a request.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested product does not exist.
    #[error("not found")]
    NotFound,
    /// One or more form fields failed validation; handled entirely by
    /// re-rendering the originating form, never surfaced as a 5xx.
    #[error("validation failed")]
    Validation(Vec<String>),
    /// The uploaded file could not be written.
    #[error(transparent)]
    Upload(#[from] UploadError),
    /// The storage layer failed for a reason other than a missing record.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}
