use crate::messaging::AwsMessagingGateway;
use crate::stores::{DynamoCollaborationStore, DynamoPersonStore, DynamoTodoStore};
use aws_config::{BehaviorVersion, Region, SdkConfig};
use service::TodoService;
use shared::config::Config;
use std::sync::Arc;

/// Load the shared AWS SDK configuration, honoring the optional local
/// endpoint override (LocalStack and friends).
pub async fn sdk_config(config: &Config) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.aws_region.clone()));

    if let Some(endpoint) = &config.aws_endpoint {
        loader = loader.endpoint_url(endpoint.clone());
    }

    loader.load().await
}

pub fn dynamodb_client(sdk: &SdkConfig) -> aws_sdk_dynamodb::Client {
    aws_sdk_dynamodb::Client::new(sdk)
}

pub fn sqs_client(sdk: &SdkConfig) -> aws_sdk_sqs::Client {
    aws_sdk_sqs::Client::new(sdk)
}

pub fn sns_client(sdk: &SdkConfig) -> aws_sdk_sns::Client {
    aws_sdk_sns::Client::new(sdk)
}

/// Composition root: wire the workflow service to the AWS adapters, all
/// driven by one [`Config`].
pub async fn build_service(config: &Config) -> TodoService {
    let sdk = sdk_config(config).await;
    let dynamodb = dynamodb_client(&sdk);

    TodoService::new(
        Arc::new(DynamoTodoStore::new(
            dynamodb.clone(),
            config.dynamodb_table.clone(),
        )),
        Arc::new(DynamoPersonStore::new(
            dynamodb.clone(),
            config.dynamodb_table.clone(),
        )),
        Arc::new(DynamoCollaborationStore::new(
            dynamodb,
            config.dynamodb_table.clone(),
        )),
        Arc::new(AwsMessagingGateway::new(
            sqs_client(&sdk),
            sns_client(&sdk),
        )),
        config.sharing_queue.clone(),
        config.updates_topic.clone(),
    )
}
