use std::env;
use tracing::info;

/// Runtime configuration, read from the environment. Queue and topic names
/// are deployment concerns and are never hardcoded by the workflow.
#[derive(Debug, Clone)]
pub struct Config {
    pub dynamodb_table: String,
    pub sharing_queue: String,
    pub updates_topic: String,
    pub environment: String,
    pub aws_region: String,
    /// Local endpoint override (LocalStack etc.); unset in real deployments.
    pub aws_endpoint: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let config = Config {
            dynamodb_table: env::var("DYNAMODB_TABLE")
                .unwrap_or_else(|_| "todo-collab-dev".to_string()),
            sharing_queue: env::var("SHARING_QUEUE")
                .unwrap_or_else(|_| "todo-sharing-dev".to_string()),
            updates_topic: env::var("UPDATES_TOPIC")
                .unwrap_or_else(|_| "todo-updates-dev".to_string()),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "eu-central-1".to_string()),
            aws_endpoint: env::var("AWS_ENDPOINT_URL").ok(),
        };

        info!(
            environment = %config.environment,
            region = %config.aws_region,
            table = %config.dynamodb_table,
            "configuration loaded"
        );

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variables_fall_back_to_dev_defaults() {
        let config = Config::from_env();
        assert!(!config.dynamodb_table.is_empty());
        assert!(!config.sharing_queue.is_empty());
        assert!(!config.updates_topic.is_empty());
    }
}
