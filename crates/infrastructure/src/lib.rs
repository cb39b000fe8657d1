pub mod client;
pub mod messaging;
pub mod retry;
pub mod stores;

pub use client::*;
pub use messaging::AwsMessagingGateway;
pub use retry::RetryPolicy;
pub use stores::{DynamoCollaborationStore, DynamoPersonStore, DynamoTodoStore};
