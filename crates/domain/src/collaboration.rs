use crate::identifiers::{CollaborationRequestId, PersonId, TodoId};
use crate::token::ConfirmationToken;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pending invitation to collaborate on a todo.
///
/// A request is created when the owner shares a todo, carried on the queue to
/// the invited collaborator, and deleted once the collaborator confirms with
/// the matching token. There is no expiry: an unconfirmed request simply
/// stays pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationRequest {
    pub id: CollaborationRequestId,
    pub todo_id: TodoId,
    pub collaborator_id: PersonId,
    pub token: ConfirmationToken,
    pub created_at: DateTime<Utc>,
}

impl CollaborationRequest {
    pub fn new(todo_id: TodoId, collaborator_id: PersonId, token: ConfirmationToken) -> Self {
        Self {
            id: CollaborationRequestId::new(),
            todo_id,
            collaborator_id,
            token,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_get_distinct_ids() {
        let todo_id = TodoId::new();
        let collaborator = PersonId::new();
        let now = Utc::now();

        let a = CollaborationRequest::new(
            todo_id.clone(),
            collaborator.clone(),
            ConfirmationToken::issue(&todo_id, &collaborator, now),
        );
        let b = CollaborationRequest::new(
            todo_id.clone(),
            collaborator.clone(),
            ConfirmationToken::issue(&todo_id, &collaborator, now),
        );

        assert_ne!(a.id, b.id);
    }
}
