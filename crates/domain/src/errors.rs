use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Invalid todo ID: {0}")]
    InvalidTodoId(String),

    #[error("Invalid person ID: {0}")]
    InvalidPersonId(String),

    #[error("Invalid collaboration request ID: {0}")]
    InvalidCollaborationRequestId(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
