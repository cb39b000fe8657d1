use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Bounded exponential backoff for messaging delivery. Exhausting the
/// attempts returns the last error; callers decide whether that is fatal.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    pub add_jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            add_jitter: true,
        }
    }
}

impl RetryPolicy {
    pub fn exponential_backoff(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            ..Self::default()
        }
    }

    /// Run once without retrying, for callers that want fail-fast delivery.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    pub async fn run<F, Fut, T, E>(&self, operation: F) -> Result<T, E>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let attempts = self.max_attempts.max(1);
        let mut delay = self.initial_delay;

        for attempt in 1..=attempts {
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!("operation succeeded after {} attempts", attempt);
                    }
                    return Ok(value);
                }
                Err(error) if attempt == attempts => {
                    warn!(%error, "operation failed after {} attempts", attempt);
                    return Err(error);
                }
                Err(error) => {
                    warn!(%error, "operation failed on attempt {}, retrying", attempt);
                    sleep(self.jittered(delay)).await;
                    delay = Duration::from_secs_f64(
                        (delay.as_secs_f64() * self.backoff_multiplier)
                            .min(self.max_delay.as_secs_f64()),
                    );
                }
            }
        }

        unreachable!("max_attempts is at least 1")
    }

    fn jittered(&self, delay: Duration) -> Duration {
        if !self.add_jitter {
            return delay;
        }
        let factor = rand::thread_rng().gen_range(0.8..1.2);
        Duration::from_secs_f64(delay.as_secs_f64() * factor)
    }
}
