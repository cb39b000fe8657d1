//! DynamoDB-backed persistence gateways.
//!
//! Single-table layout: the todo item lives at `PK=TODO#{id} SK=TODO` and
//! its collaboration requests at `PK=TODO#{id} SK=COLLAB#{collaborator_id}`,
//! so the pair lookup is a GetItem and requests disappear with the todo's
//! partition. People live at `PK=PERSON#{id} SK=PROFILE` with a `name-index`
//! GSI for the unique display-name lookup.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use chrono::{DateTime, Utc};
use domain::{
    CollaborationRequest, CollaborationRequestId, ConfirmationToken, Person, PersonId, Todo,
    TodoId,
};
use service::{CollaborationStore, PersonStore, StoreError, TodoStore};
use std::collections::HashMap;

const TODO_SK: &str = "TODO";
const PROFILE_SK: &str = "PROFILE";
const COLLAB_SK_PREFIX: &str = "COLLAB#";
const NAME_INDEX: &str = "name-index";

fn todo_pk(id: &TodoId) -> String {
    format!("TODO#{id}")
}

fn person_pk(id: &PersonId) -> String {
    format!("PERSON#{id}")
}

fn collab_sk(collaborator_id: &PersonId) -> String {
    format!("{COLLAB_SK_PREFIX}{collaborator_id}")
}

fn backend_error(e: impl std::fmt::Display) -> StoreError {
    StoreError::Backend(e.to_string())
}

type Item = HashMap<String, AttributeValue>;

fn get_s<'a>(item: &'a Item, key: &str) -> Option<&'a str> {
    item.get(key).and_then(|v| v.as_s().ok()).map(|s| s.as_str())
}

fn get_datetime(item: &Item, key: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(get_s(item, key)?)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn todo_to_item(todo: &Todo) -> Item {
    let mut item = HashMap::from([
        ("PK".to_string(), AttributeValue::S(todo_pk(&todo.id))),
        ("SK".to_string(), AttributeValue::S(TODO_SK.to_string())),
        ("id".to_string(), AttributeValue::S(todo.id.to_string())),
        ("title".to_string(), AttributeValue::S(todo.title.clone())),
        (
            "completed".to_string(),
            AttributeValue::Bool(todo.completed),
        ),
        (
            "created_at".to_string(),
            AttributeValue::S(todo.created_at.to_rfc3339()),
        ),
    ]);
    if let Some(description) = &todo.description {
        item.insert(
            "description".to_string(),
            AttributeValue::S(description.clone()),
        );
    }
    if let Some(owner) = &todo.owner {
        item.insert("owner".to_string(), AttributeValue::S(owner.to_string()));
    }
    if let Some(updated_at) = &todo.updated_at {
        item.insert(
            "updated_at".to_string(),
            AttributeValue::S(updated_at.to_rfc3339()),
        );
    }
    item
}

fn item_to_todo(item: &Item) -> Option<Todo> {
    Some(Todo {
        id: TodoId::from_string(get_s(item, "id")?.to_string()).ok()?,
        title: get_s(item, "title")?.to_string(),
        description: get_s(item, "description").map(str::to_string),
        completed: *item.get("completed")?.as_bool().ok()?,
        owner: match get_s(item, "owner") {
            Some(owner) => Some(PersonId::from_string(owner.to_string()).ok()?),
            None => None,
        },
        collaboration_requests: Vec::new(),
        created_at: get_datetime(item, "created_at")?,
        updated_at: get_datetime(item, "updated_at"),
    })
}

fn request_to_item(request: &CollaborationRequest) -> Item {
    HashMap::from([
        (
            "PK".to_string(),
            AttributeValue::S(todo_pk(&request.todo_id)),
        ),
        (
            "SK".to_string(),
            AttributeValue::S(collab_sk(&request.collaborator_id)),
        ),
        ("id".to_string(), AttributeValue::S(request.id.to_string())),
        (
            "todo_id".to_string(),
            AttributeValue::S(request.todo_id.to_string()),
        ),
        (
            "collaborator_id".to_string(),
            AttributeValue::S(request.collaborator_id.to_string()),
        ),
        (
            "token".to_string(),
            AttributeValue::S(request.token.as_str().to_string()),
        ),
        (
            "created_at".to_string(),
            AttributeValue::S(request.created_at.to_rfc3339()),
        ),
    ])
}

fn item_to_request(item: &Item) -> Option<CollaborationRequest> {
    Some(CollaborationRequest {
        id: CollaborationRequestId::from_string(get_s(item, "id")?.to_string()).ok()?,
        todo_id: TodoId::from_string(get_s(item, "todo_id")?.to_string()).ok()?,
        collaborator_id: PersonId::from_string(get_s(item, "collaborator_id")?.to_string())
            .ok()?,
        token: ConfirmationToken::from_string(get_s(item, "token")?.to_string()),
        created_at: get_datetime(item, "created_at")?,
    })
}

fn person_to_item(person: &Person) -> Item {
    HashMap::from([
        ("PK".to_string(), AttributeValue::S(person_pk(&person.id))),
        ("SK".to_string(), AttributeValue::S(PROFILE_SK.to_string())),
        ("id".to_string(), AttributeValue::S(person.id.to_string())),
        ("name".to_string(), AttributeValue::S(person.name.clone())),
        ("email".to_string(), AttributeValue::S(person.email.clone())),
    ])
}

fn item_to_person(item: &Item) -> Option<Person> {
    Some(Person {
        id: PersonId::from_string(get_s(item, "id")?.to_string()).ok()?,
        name: get_s(item, "name")?.to_string(),
        email: get_s(item, "email")?.to_string(),
    })
}

#[derive(Clone)]
pub struct DynamoTodoStore {
    client: Client,
    table_name: String,
}

impl DynamoTodoStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl TodoStore for DynamoTodoStore {
    async fn find(&self, id: &TodoId) -> Result<Option<Todo>, StoreError> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("PK = :pk")
            .expression_attribute_values(":pk", AttributeValue::S(todo_pk(id)))
            .send()
            .await
            .map_err(backend_error)?;

        let items = result.items();
        let mut todo = match items
            .iter()
            .find(|item| get_s(item, "SK") == Some(TODO_SK))
            .and_then(item_to_todo)
        {
            Some(todo) => todo,
            None => return Ok(None),
        };

        todo.collaboration_requests = items
            .iter()
            .filter(|item| {
                get_s(item, "SK").is_some_and(|sk| sk.starts_with(COLLAB_SK_PREFIX))
            })
            .filter_map(item_to_request)
            .collect();

        Ok(Some(todo))
    }

    async fn save(&self, todo: Todo) -> Result<Todo, StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(todo_to_item(&todo)))
            .send()
            .await
            .map_err(backend_error)?;

        for request in &todo.collaboration_requests {
            self.client
                .put_item()
                .table_name(&self.table_name)
                .set_item(Some(request_to_item(request)))
                .send()
                .await
                .map_err(backend_error)?;
        }

        Ok(todo)
    }
}

#[derive(Clone)]
pub struct DynamoPersonStore {
    client: Client,
    table_name: String,
}

impl DynamoPersonStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl PersonStore for DynamoPersonStore {
    async fn find(&self, id: &PersonId) -> Result<Option<Person>, StoreError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(person_pk(id)))
            .key("SK", AttributeValue::S(PROFILE_SK.to_string()))
            .send()
            .await
            .map_err(backend_error)?;

        Ok(result.item().and_then(item_to_person))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Person>, StoreError> {
        // "name" is a DynamoDB reserved word
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(NAME_INDEX)
            .key_condition_expression("#name = :name")
            .expression_attribute_names("#name", "name")
            .expression_attribute_values(":name", AttributeValue::S(name.to_string()))
            .send()
            .await
            .map_err(backend_error)?;

        Ok(result.items().iter().find_map(item_to_person))
    }

    async fn save(&self, person: Person) -> Result<Person, StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(person_to_item(&person)))
            .send()
            .await
            .map_err(backend_error)?;

        Ok(person)
    }
}

#[derive(Clone)]
pub struct DynamoCollaborationStore {
    client: Client,
    table_name: String,
}

impl DynamoCollaborationStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl CollaborationStore for DynamoCollaborationStore {
    async fn find_by_todo_and_collaborator(
        &self,
        todo_id: &TodoId,
        collaborator_id: &PersonId,
    ) -> Result<Option<CollaborationRequest>, StoreError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(todo_pk(todo_id)))
            .key("SK", AttributeValue::S(collab_sk(collaborator_id)))
            .send()
            .await
            .map_err(backend_error)?;

        Ok(result.item().and_then(item_to_request))
    }

    async fn delete(&self, request: &CollaborationRequest) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(todo_pk(&request.todo_id)))
            .key(
                "SK",
                AttributeValue::S(collab_sk(&request.collaborator_id)),
            )
            .send()
            .await
            .map_err(backend_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_item_round_trips() {
        let mut todo = Todo::new("Buy milk", Some("two bottles".to_string())).unwrap();
        todo.owner = Some(PersonId::new());

        let parsed = item_to_todo(&todo_to_item(&todo)).unwrap();
        assert_eq!(parsed.id, todo.id);
        assert_eq!(parsed.title, todo.title);
        assert_eq!(parsed.description, todo.description);
        assert_eq!(parsed.owner, todo.owner);
        assert!(!parsed.completed);
    }

    #[test]
    fn request_item_round_trips() {
        let todo_id = TodoId::new();
        let collaborator = PersonId::new();
        let request = CollaborationRequest::new(
            todo_id.clone(),
            collaborator.clone(),
            ConfirmationToken::issue(&todo_id, &collaborator, Utc::now()),
        );

        let item = request_to_item(&request);
        assert_eq!(
            get_s(&item, "SK"),
            Some(format!("COLLAB#{collaborator}").as_str())
        );

        let parsed = item_to_request(&item).unwrap();
        assert_eq!(parsed.id, request.id);
        assert_eq!(parsed.token, request.token);
    }

    #[test]
    fn person_item_round_trips() {
        let person = Person::new("alice", "alice@example.com").unwrap();
        let parsed = item_to_person(&person_to_item(&person)).unwrap();
        assert_eq!(parsed, person);
    }

    #[test]
    fn malformed_items_are_skipped() {
        let item = HashMap::from([(
            "id".to_string(),
            AttributeValue::S("not-a-ulid".to_string()),
        )]);
        assert!(item_to_todo(&item).is_none());
        assert!(item_to_person(&item).is_none());
        assert!(item_to_request(&item).is_none());
    }
}
