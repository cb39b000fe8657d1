use crate::errors::{ServiceError, ServiceResult};
use crate::gateways::{CollaborationStore, MessagingGateway, PersonStore, TodoStore};
use crate::identity::IdentityContext;
use chrono::Utc;
use domain::{CollaborationRequest, ConfirmationToken, Person, PersonId, Todo, TodoId};
use std::sync::Arc;
use tracing::{info, warn};

pub const COLLABORATION_CONFIRMED: &str = "Collaboration confirmed.";
pub const COLLABORATION_REQUEST_INVALID: &str = "Collaboration request invalid.";

/// Orchestrates the collaboration workflow: invite, deliver the token over
/// the sharing queue, validate the confirmation, broadcast the outcome on
/// the updates topic, clean up. Stateless between calls; everything lives in
/// the stores.
pub struct TodoService {
    todos: Arc<dyn TodoStore>,
    people: Arc<dyn PersonStore>,
    collaborations: Arc<dyn CollaborationStore>,
    messaging: Arc<dyn MessagingGateway>,
    sharing_queue: String,
    updates_topic: String,
}

impl TodoService {
    pub fn new(
        todos: Arc<dyn TodoStore>,
        people: Arc<dyn PersonStore>,
        collaborations: Arc<dyn CollaborationStore>,
        messaging: Arc<dyn MessagingGateway>,
        sharing_queue: impl Into<String>,
        updates_topic: impl Into<String>,
    ) -> Self {
        Self {
            todos,
            people,
            collaborations,
            messaging,
            sharing_queue: sharing_queue.into(),
            updates_topic: updates_topic.into(),
        }
    }

    /// Persist a todo, assigning an owner first when none is set. The owner
    /// is the calling principal, looked up by name and provisioned lazily
    /// (name and email from the identity context) on first contact.
    pub async fn save(
        &self,
        mut todo: Todo,
        identity: &dyn IdentityContext,
    ) -> ServiceResult<Todo> {
        if todo.owner.is_none() {
            let username = identity.principal_name();
            let person = match self.people.find_by_name(username).await? {
                Some(person) => person,
                None => {
                    let person = Person::new(username, identity.principal_email())?;
                    info!(name = %person.name, "provisioning person for first-time principal");
                    self.people.save(person).await?
                }
            };
            todo.owner = Some(person.id);
        }

        Ok(self.todos.save(todo).await?)
    }

    /// Invite a collaborator to a todo. Issues a confirmation token, stores
    /// the pending request on the todo, and hands the request to the sharing
    /// queue. Returns the collaborator's display name.
    ///
    /// Queue delivery is best-effort: the persisted request is authoritative,
    /// so a delivery failure is logged and does not fail the call.
    pub async fn share_with_collaborator(
        &self,
        todo_id: &TodoId,
        collaborator_id: &PersonId,
    ) -> ServiceResult<String> {
        let mut todo = self
            .todos
            .find(todo_id)
            .await?
            .ok_or_else(|| ServiceError::TodoNotFound(todo_id.clone()))?;
        let collaborator = self
            .people
            .find(collaborator_id)
            .await?
            .ok_or_else(|| ServiceError::PersonNotFound(collaborator_id.clone()))?;

        info!(todo_id = %todo_id, collaborator_id = %collaborator_id, "sharing todo");

        let token = ConfirmationToken::issue(todo_id, collaborator_id, Utc::now());
        let request =
            CollaborationRequest::new(todo_id.clone(), collaborator_id.clone(), token);
        todo.add_collaboration_request(request.clone());
        self.todos.save(todo).await?;

        if let Err(error) = self
            .messaging
            .send_to_queue(&self.sharing_queue, &request)
            .await
        {
            warn!(
                request_id = %request.id,
                queue = %self.sharing_queue,
                %error,
                "collaboration request persisted but not delivered"
            );
        }

        Ok(collaborator.name)
    }

    /// Confirm a pending invitation. Unresolvable ids and a missing request
    /// fail; a wrong token is a normal negative outcome and comes back as
    /// [`COLLABORATION_REQUEST_INVALID`] with the request left untouched.
    /// On a match the confirmation is published to the updates topic and the
    /// request deleted, so a second confirmation attempt finds nothing.
    pub async fn confirm_collaboration(
        &self,
        todo_id: &TodoId,
        collaborator_id: &PersonId,
        token: &str,
    ) -> ServiceResult<String> {
        self.todos
            .find(todo_id)
            .await?
            .ok_or_else(|| ServiceError::TodoNotFound(todo_id.clone()))?;
        self.people
            .find(collaborator_id)
            .await?
            .ok_or_else(|| ServiceError::PersonNotFound(collaborator_id.clone()))?;
        let request = self
            .collaborations
            .find_by_todo_and_collaborator(todo_id, collaborator_id)
            .await?
            .ok_or(ServiceError::CollaborationRequestNotFound)?;

        if !request.token.matches(token) {
            info!(request_id = %request.id, "collaboration confirmation with wrong token");
            return Ok(COLLABORATION_REQUEST_INVALID.to_string());
        }

        if let Err(error) = self
            .messaging
            .publish_notification(
                &self.updates_topic,
                request.id.as_str(),
                COLLABORATION_CONFIRMED,
            )
            .await
        {
            warn!(
                request_id = %request.id,
                topic = %self.updates_topic,
                %error,
                "confirmation notification not published"
            );
        }

        self.collaborations.delete(&request).await?;
        info!(request_id = %request.id, "collaboration confirmed");

        Ok(COLLABORATION_CONFIRMED.to_string())
    }
}
