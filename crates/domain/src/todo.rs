use crate::collaboration::CollaborationRequest;
use crate::errors::{DomainError, DomainResult};
use crate::identifiers::{PersonId, TodoId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task record. Every persisted todo has exactly one owner; the owner is
/// resolved from the caller identity at save time when absent. The todo
/// exclusively owns its collaboration requests, which ride along on every
/// save and are removed with the todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub owner: Option<PersonId>,
    #[serde(default)]
    pub collaboration_requests: Vec<CollaborationRequest>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Todo {
    pub fn new(title: impl Into<String>, description: Option<String>) -> DomainResult<Self> {
        let title = title.into();

        if title.trim().is_empty() {
            return Err(DomainError::Validation(
                "Title cannot be empty".to_string(),
            ));
        }

        if title.len() > 200 {
            return Err(DomainError::Validation(
                "Title too long (max 200 characters)".to_string(),
            ));
        }

        if let Some(ref desc) = description {
            if desc.len() > 1000 {
                return Err(DomainError::Validation(
                    "Description too long (max 1000 characters)".to_string(),
                ));
            }
        }

        Ok(Self {
            id: TodoId::new(),
            title: title.trim().to_string(),
            description: description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            completed: false,
            owner: None,
            collaboration_requests: Vec::new(),
            created_at: Utc::now(),
            updated_at: None,
        })
    }

    pub fn add_collaboration_request(&mut self, request: CollaborationRequest) {
        self.collaboration_requests.push(request);
        self.updated_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::ConfirmationToken;

    #[test]
    fn todo_rejects_empty_title() {
        assert!(Todo::new("", None).is_err());
    }

    #[test]
    fn todo_rejects_overlong_title() {
        assert!(Todo::new("a".repeat(201), None).is_err());
    }

    #[test]
    fn new_todo_has_no_owner_and_no_requests() {
        let todo = Todo::new("Buy milk", None).unwrap();
        assert!(todo.owner.is_none());
        assert!(todo.collaboration_requests.is_empty());
    }

    #[test]
    fn blank_description_is_dropped() {
        let todo = Todo::new("Buy milk", Some("   ".to_string())).unwrap();
        assert!(todo.description.is_none());
    }

    #[test]
    fn adding_a_request_touches_updated_at() {
        let mut todo = Todo::new("Buy milk", None).unwrap();
        let collaborator = PersonId::new();
        let token = ConfirmationToken::issue(&todo.id, &collaborator, Utc::now());
        todo.add_collaboration_request(CollaborationRequest::new(
            todo.id.clone(),
            collaborator,
            token,
        ));

        assert_eq!(todo.collaboration_requests.len(), 1);
        assert!(todo.updated_at.is_some());
    }
}
