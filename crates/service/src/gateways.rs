use crate::errors::{MessagingError, StoreError};
use async_trait::async_trait;
use domain::{CollaborationRequest, Person, PersonId, Todo, TodoId};

#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn find(&self, id: &TodoId) -> Result<Option<Todo>, StoreError>;

    /// Insert or update. Persisting a todo carries its collaboration
    /// requests with it; removal of the todo removes them too.
    async fn save(&self, todo: Todo) -> Result<Todo, StoreError>;
}

#[async_trait]
pub trait PersonStore: Send + Sync {
    async fn find(&self, id: &PersonId) -> Result<Option<Person>, StoreError>;

    /// Display names are unique, so this is the login-key lookup.
    async fn find_by_name(&self, name: &str) -> Result<Option<Person>, StoreError>;

    async fn save(&self, person: Person) -> Result<Person, StoreError>;
}

#[async_trait]
pub trait CollaborationStore: Send + Sync {
    async fn find_by_todo_and_collaborator(
        &self,
        todo_id: &TodoId,
        collaborator_id: &PersonId,
    ) -> Result<Option<CollaborationRequest>, StoreError>;

    async fn delete(&self, request: &CollaborationRequest) -> Result<(), StoreError>;
}

/// Outbound messaging: point-to-point queue delivery for invitation tokens
/// and fan-out notification publishing for confirmations. Queue and topic
/// names are configuration, supplied by the caller on every send.
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    async fn send_to_queue(
        &self,
        queue: &str,
        request: &CollaborationRequest,
    ) -> Result<(), MessagingError>;

    async fn publish_notification(
        &self,
        topic: &str,
        payload: &str,
        subject: &str,
    ) -> Result<(), MessagingError>;
}
