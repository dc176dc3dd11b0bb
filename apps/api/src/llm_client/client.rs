use std::future::Future;
use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::GenerationError;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, PROBE_MARKER, PROBE_PROMPT};
use crate::llm_client::{LlmError, RetryPolicy, TextGenerator};

/// Resilient wrapper around a [`TextGenerator`].
///
/// Every call gets the same treatment: up to `policy.max_attempts` tries,
/// exponential backoff between them, blank replies counted as failures.
/// Holds no state between calls.
#[derive(Clone)]
pub struct GenerationClient {
    generator: Arc<dyn TextGenerator>,
    policy: RetryPolicy,
}

impl GenerationClient {
    /// Builds the client and runs the connectivity probe once.
    ///
    /// Fails with `GenerationError::Configuration` when no reply containing
    /// the probe marker arrives within the retry budget.
    pub async fn connect(
        generator: Arc<dyn TextGenerator>,
        policy: RetryPolicy,
    ) -> Result<Self, GenerationError> {
        let client = Self::without_probe(generator, policy);
        let this = &client;
        this.with_retry("connectivity probe", || async move {
            let reply = this.generator.generate(PROBE_PROMPT, JSON_ONLY_SYSTEM).await?;
            if reply.contains(PROBE_MARKER) {
                Ok(reply)
            } else {
                Err(LlmError::UnexpectedReply(truncate(&reply, 80)))
            }
        })
        .await
        .map_err(|(attempts, e)| {
            GenerationError::Configuration(format!(
                "API connection failed after {attempts} attempts: {e}"
            ))
        })?;
        info!("Generation client connected (probe passed)");
        Ok(client)
    }

    /// Builds the client without probing. For callers that already know the
    /// capability is reachable, and for tests.
    pub fn without_probe(generator: Arc<dyn TextGenerator>, policy: RetryPolicy) -> Self {
        Self { generator, policy }
    }

    /// Sends `prompt` and returns the trimmed reply text.
    pub async fn complete(&self, prompt: &str, system: &str) -> Result<String, GenerationError> {
        self.with_retry("completion", || async move {
            let text = self.generator.generate(prompt, system).await?;
            let text = text.trim();
            if text.is_empty() {
                Err(LlmError::EmptyContent)
            } else {
                Ok(text.to_string())
            }
        })
        .await
        .map_err(|(attempts, e)| GenerationError::Generation {
            attempts,
            last_error: e.to_string(),
        })
    }

    async fn with_retry<F, Fut>(&self, label: &str, mut call: F) -> Result<String, (u32, LlmError)>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<String, LlmError>>,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_error = LlmError::EmptyContent;

        for attempt in 0..max_attempts {
            match call().await {
                Ok(text) => {
                    info!("LLM {label} succeeded on attempt {}", attempt + 1);
                    return Ok(text);
                }
                Err(e) => {
                    warn!("LLM {label} attempt {} failed: {e}", attempt + 1);
                    last_error = e;
                }
            }

            if attempt + 1 < max_attempts {
                let delay = self.policy.delay_for(attempt);
                warn!("Retrying LLM {label} after {}ms...", delay.as_millis());
                tokio::time::sleep(delay).await;
            }
        }

        Err((max_attempts, last_error))
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;

    fn client_with(generator: Arc<ScriptedGenerator>, policy: RetryPolicy) -> GenerationClient {
        GenerationClient::without_probe(generator, policy)
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_failures_then_success_sleeps_twice() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Err(LlmError::Api {
                status: 529,
                message: "overloaded".to_string(),
            }),
            Ok("   ".to_string()),
            Ok("  final answer \n".to_string()),
        ]));
        let policy = RetryPolicy::new(3, Duration::from_secs(1));
        let client = client_with(generator.clone(), policy);

        let started = tokio::time::Instant::now();
        let text = client.complete("prompt", "system").await.unwrap();

        assert_eq!(text, "final answer");
        assert_eq!(generator.calls(), 3);
        // 2^0 + 2^1 seconds of backoff, nothing else.
        assert_eq!(started.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_try_success_does_not_sleep() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Ok("ok".to_string())]));
        let client = client_with(generator.clone(), RetryPolicy::default());

        let started = tokio::time::Instant::now();
        client.complete("prompt", "system").await.unwrap();

        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_exhausted_attempts_carry_last_error() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Err(LlmError::EmptyContent),
            Err(LlmError::EmptyContent),
            Err(LlmError::UnexpectedReply("third".to_string())),
        ]));
        let client = client_with(generator.clone(), RetryPolicy::immediate(3));

        match client.complete("prompt", "system").await {
            Err(GenerationError::Generation {
                attempts,
                last_error,
            }) => {
                assert_eq!(attempts, 3);
                assert!(last_error.contains("third"));
            }
            other => panic!("expected generation failure, got {other:?}"),
        }
        assert_eq!(generator.calls(), 3);
    }

    #[tokio::test]
    async fn test_connect_passes_when_marker_present() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Ok(
            "Sure: API_TEST_SUCCESS".to_string()
        )]));
        let client = GenerationClient::connect(generator.clone(), RetryPolicy::immediate(3)).await;
        assert!(client.is_ok());
        assert_eq!(generator.prompts()[0], PROBE_PROMPT);
    }

    #[tokio::test]
    async fn test_connect_retries_wrong_replies_then_fails_as_configuration() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok("hello".to_string()),
            Ok("hello again".to_string()),
            Ok("still no marker".to_string()),
        ]));
        let result = GenerationClient::connect(generator.clone(), RetryPolicy::immediate(3)).await;
        assert!(matches!(result, Err(GenerationError::Configuration(_))));
        assert_eq!(generator.calls(), 3);
    }

    #[tokio::test]
    async fn test_connect_recovers_from_transient_failure() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Err(LlmError::EmptyContent),
            Ok("API_TEST_SUCCESS".to_string()),
        ]));
        let result = GenerationClient::connect(generator, RetryPolicy::immediate(3)).await;
        assert!(result.is_ok());
    }
}
