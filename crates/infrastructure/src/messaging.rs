use crate::retry::RetryPolicy;
use async_trait::async_trait;
use domain::CollaborationRequest;
use service::{MessagingError, MessagingGateway};
use tracing::debug;

/// SQS point-to-point delivery plus SNS fan-out, with bounded retry around
/// each send. A send that survives the retry budget comes back as a
/// [`MessagingError`]; the workflow logs it rather than failing, because the
/// persisted state is authoritative.
pub struct AwsMessagingGateway {
    sqs: aws_sdk_sqs::Client,
    sns: aws_sdk_sns::Client,
    retry: RetryPolicy,
}

impl AwsMessagingGateway {
    pub fn new(sqs: aws_sdk_sqs::Client, sns: aws_sdk_sns::Client) -> Self {
        Self {
            sqs,
            sns,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn queue_url(&self, queue: &str) -> Result<String, MessagingError> {
        let result = self
            .sqs
            .get_queue_url()
            .queue_name(queue)
            .send()
            .await
            .map_err(|e| MessagingError::Delivery(e.to_string()))?;

        result
            .queue_url()
            .map(str::to_string)
            .ok_or_else(|| MessagingError::Delivery(format!("no URL for queue {queue}")))
    }
}

#[async_trait]
impl MessagingGateway for AwsMessagingGateway {
    async fn send_to_queue(
        &self,
        queue: &str,
        request: &CollaborationRequest,
    ) -> Result<(), MessagingError> {
        let body = serde_json::to_string(request)
            .map_err(|e| MessagingError::Delivery(e.to_string()))?;

        self.retry
            .run(|| async {
                let queue_url = self.queue_url(queue).await?;
                self.sqs
                    .send_message()
                    .queue_url(queue_url)
                    .message_body(body.clone())
                    .send()
                    .await
                    .map_err(|e| MessagingError::Delivery(e.to_string()))?;
                Ok(())
            })
            .await?;

        debug!(request_id = %request.id, queue, "collaboration request enqueued");
        Ok(())
    }

    async fn publish_notification(
        &self,
        topic: &str,
        payload: &str,
        subject: &str,
    ) -> Result<(), MessagingError> {
        self.retry
            .run(|| async {
                self.sns
                    .publish()
                    .topic_arn(topic)
                    .message(payload)
                    .subject(subject)
                    .send()
                    .await
                    .map_err(|e| MessagingError::Delivery(e.to_string()))?;
                Ok(())
            })
            .await?;

        debug!(topic, subject, "notification published");
        Ok(())
    }
}
