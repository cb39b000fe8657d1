//! In-memory gateway implementations, for tests and local runs.

use crate::errors::{MessagingError, StoreError};
use crate::gateways::{CollaborationStore, MessagingGateway, PersonStore, TodoStore};
use async_trait::async_trait;
use domain::{CollaborationRequest, Person, PersonId, Todo, TodoId};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct State {
    todos: HashMap<TodoId, Todo>,
    people: HashMap<PersonId, Person>,
}

/// One store backing all three persistence traits. Collaboration requests
/// live inside their owning todo, so todo-level operations cascade over them
/// the way the persistence contract requires.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    inner: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collaboration_request_count(&self, todo_id: &TodoId) -> usize {
        self.inner
            .read()
            .todos
            .get(todo_id)
            .map(|todo| todo.collaboration_requests.len())
            .unwrap_or(0)
    }

    pub fn person_count(&self) -> usize {
        self.inner.read().people.len()
    }
}

#[async_trait]
impl TodoStore for InMemoryStore {
    async fn find(&self, id: &TodoId) -> Result<Option<Todo>, StoreError> {
        Ok(self.inner.read().todos.get(id).cloned())
    }

    async fn save(&self, todo: Todo) -> Result<Todo, StoreError> {
        let mut guard = self.inner.write();
        guard.todos.insert(todo.id.clone(), todo.clone());
        Ok(todo)
    }
}

#[async_trait]
impl PersonStore for InMemoryStore {
    async fn find(&self, id: &PersonId) -> Result<Option<Person>, StoreError> {
        Ok(self.inner.read().people.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Person>, StoreError> {
        Ok(self
            .inner
            .read()
            .people
            .values()
            .find(|person| person.name == name)
            .cloned())
    }

    async fn save(&self, person: Person) -> Result<Person, StoreError> {
        let mut guard = self.inner.write();
        guard.people.insert(person.id.clone(), person.clone());
        Ok(person)
    }
}

#[async_trait]
impl CollaborationStore for InMemoryStore {
    async fn find_by_todo_and_collaborator(
        &self,
        todo_id: &TodoId,
        collaborator_id: &PersonId,
    ) -> Result<Option<CollaborationRequest>, StoreError> {
        Ok(self.inner.read().todos.get(todo_id).and_then(|todo| {
            todo.collaboration_requests
                .iter()
                .find(|request| request.collaborator_id == *collaborator_id)
                .cloned()
        }))
    }

    async fn delete(&self, request: &CollaborationRequest) -> Result<(), StoreError> {
        let mut guard = self.inner.write();
        if let Some(todo) = guard.todos.get_mut(&request.todo_id) {
            todo.collaboration_requests
                .retain(|candidate| candidate.id != request.id);
        }
        Ok(())
    }
}

/// Record of one `publish_notification` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedNotification {
    pub topic: String,
    pub payload: String,
    pub subject: String,
}

/// Captures outbound messages instead of delivering them. Can be switched
/// into a failing mode to exercise the best-effort delivery paths.
#[derive(Default)]
pub struct RecordingMessagingGateway {
    sent: RwLock<Vec<(String, CollaborationRequest)>>,
    published: RwLock<Vec<PublishedNotification>>,
    failing: AtomicBool,
}

impl RecordingMessagingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_deliveries(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<(String, CollaborationRequest)> {
        self.sent.read().clone()
    }

    pub fn published(&self) -> Vec<PublishedNotification> {
        self.published.read().clone()
    }
}

#[async_trait]
impl MessagingGateway for RecordingMessagingGateway {
    async fn send_to_queue(
        &self,
        queue: &str,
        request: &CollaborationRequest,
    ) -> Result<(), MessagingError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MessagingError::Delivery("queue unreachable".to_string()));
        }
        self.sent
            .write()
            .push((queue.to_string(), request.clone()));
        Ok(())
    }

    async fn publish_notification(
        &self,
        topic: &str,
        payload: &str,
        subject: &str,
    ) -> Result<(), MessagingError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MessagingError::Delivery("topic unreachable".to_string()));
        }
        self.published.write().push(PublishedNotification {
            topic: topic.to_string(),
            payload: payload.to_string(),
            subject: subject.to_string(),
        });
        Ok(())
    }
}
