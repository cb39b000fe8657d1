//! Walks the invitation workflow once against real AWS resources: save a
//! todo, invite a collaborator, then attempt a confirmation with a bad token
//! to show the soft rejection. The real token travels over the sharing
//! queue, so confirming for real is the queue consumer's business.
//!
//! Point it at LocalStack with
//! `AWS_ENDPOINT_URL=http://localhost:4566 cargo run -p infrastructure --example local_workflow`

use domain::{Person, Todo};
use infrastructure::{build_service, dynamodb_client, sdk_config, DynamoPersonStore};
use service::{PersonStore, StaticIdentity};
use shared::config::Config;
use shared::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing()?;
    let config = Config::from_env();

    let sdk = sdk_config(&config).await;
    let people = DynamoPersonStore::new(dynamodb_client(&sdk), config.dynamodb_table.clone());
    let service = build_service(&config).await;

    let todo = service
        .save(
            Todo::new("Water the plants", None)?,
            &StaticIdentity::new("alice", "alice@example.com"),
        )
        .await?;
    println!("saved todo {}", todo.id);

    let collaborator = people
        .save(Person::new("bob", "bob@example.com")?)
        .await?;
    let name = service
        .share_with_collaborator(&todo.id, &collaborator.id)
        .await?;
    println!("invitation queued for {name}");

    let outcome = service
        .confirm_collaboration(&todo.id, &collaborator.id, "not-the-token")
        .await?;
    println!("confirmation with a bad token: {outcome}");

    Ok(())
}
