use domain::{DomainError, PersonId, TodoId};
use thiserror::Error;

/// Failure inside a persistence adapter. The service treats the backend as
/// opaque; adapters stringify their own error types.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Persistence error: {0}")]
    Backend(String),
}

/// Failure to hand a message to the queue or topic, reported after the
/// adapter has exhausted its own retries.
#[derive(Debug, Clone, Error)]
pub enum MessagingError {
    #[error("Message delivery failed: {0}")]
    Delivery(String),
}

#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("Invalid todo ID: {0}")]
    TodoNotFound(TodoId),

    #[error("Invalid person ID: {0}")]
    PersonNotFound(PersonId),

    /// A (todo, collaborator) pair that resolves to no pending request.
    /// Distinct from the id-level NotFound variants above.
    #[error("Invalid todo or collaborator.")]
    CollaborationRequestNotFound,

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
