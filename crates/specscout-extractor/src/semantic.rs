//! Model-backed extraction
//!
//! One document goes through five steps:
//!
//! 1. **Pre-scan**: no weight keyword means no model call at all.
//! 2. **Truncate**: only the first `max_prompt_chars` characters are sent.
//! 3. **Invoke**: a structured-output request with [`RESPONSE_SCHEMA`].
//! 4. **Retry**: transient failures back off and retry; permanent ones stop.
//! 5. **Validate**: the response must match the schema exactly.
//!
//! The run-level [`AbortSignal`] is checked before every attempt.

use crate::config::ExtractorConfig;
use crate::engine::{AbortSignal, Engine, Extraction};
use crate::error::ExtractorError;
use crate::keywords::has_weight_keyword;
use crate::prompt::{truncate_chars, PromptBuilder};
use crate::retry::{retry_with_backoff, RetryError};
use crate::schema::{parse_response, RESPONSE_SCHEMA};
use specscout_domain::LlmProvider;
use specscout_llm::LlmError;
use thiserror::Error;
use tracing::{debug, info, warn};

/// What went wrong with a single model attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
enum AttemptError {
    #[error("aborted before the call")]
    Aborted,

    #[error("call timed out")]
    TimedOut,

    #[error(transparent)]
    Llm(#[from] LlmError),
}

impl AttemptError {
    fn is_transient(&self) -> bool {
        match self {
            AttemptError::Aborted => false,
            AttemptError::TimedOut => true,
            AttemptError::Llm(e) => e.is_transient(),
        }
    }
}

/// Extractor that asks a language model for the product specification
pub struct SemanticExtractor<L> {
    provider: L,
    config: ExtractorConfig,
}

impl<L> SemanticExtractor<L>
where
    L: LlmProvider<Error = LlmError> + Send + Sync,
{
    /// Create a new semantic extractor
    ///
    /// # Errors
    ///
    /// Returns `ExtractorError::Config` if the configuration is invalid.
    pub fn new(provider: L, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self { provider, config })
    }

    /// Extract name and characteristics from the aggregated document text
    pub async fn extract(
        &self,
        text: &str,
        abort: &AbortSignal,
    ) -> Result<Extraction, ExtractorError> {
        if !has_weight_keyword(text) {
            debug!("No weight keyword, skipping model call");
            return Err(ExtractorError::NoKeywordMatch);
        }

        let truncated = truncate_chars(text, self.config.max_prompt_chars);
        if truncated.len() < text.len() {
            debug!(
                "Truncated text from {} to {} bytes",
                text.len(),
                truncated.len()
            );
        }

        let prompt = PromptBuilder::new(truncated).build();
        let body = self.call_with_retry(&prompt, abort).await?;

        debug!("Model response length: {} chars", body.len());

        let response = parse_response(&body).inspect_err(|e| warn!("{}", e))?;
        let name = Some(response.name.trim().to_string()).filter(|n| !n.is_empty());
        let characteristics = response.characteristics.into_iter().map(Into::into).collect();

        Ok(Extraction {
            name,
            characteristics,
        })
    }

    async fn call_with_retry(&self, prompt: &str, abort: &AbortSignal) -> Result<String, ExtractorError> {
        let provider = &self.provider;
        let call_timeout = self.config.call_timeout();

        let result = retry_with_backoff(
            &self.config.retry,
            move |attempt| async move {
                if abort.is_aborted() {
                    return Err(AttemptError::Aborted);
                }
                debug!("Model call attempt {}", attempt);
                match tokio::time::timeout(
                    call_timeout,
                    provider.generate_structured(prompt, RESPONSE_SCHEMA),
                )
                .await
                {
                    Ok(reply) => reply.map_err(AttemptError::from),
                    Err(_) => Err(AttemptError::TimedOut),
                }
            },
            AttemptError::is_transient,
            |attempt, error, delay| {
                warn!(
                    "Attempt {} failed ({}), retrying in {}ms",
                    attempt,
                    error,
                    delay.as_millis()
                );
            },
        )
        .await;

        match result {
            Ok(body) => Ok(body),
            Err(RetryError::Permanent {
                error: AttemptError::Aborted,
                attempts,
            }) => {
                info!("Run aborted, no model call after {} attempt(s)", attempts.saturating_sub(1));
                Err(ExtractorError::Aborted)
            }
            Err(RetryError::Permanent {
                error: AttemptError::Llm(LlmError::InvalidResponse(msg)),
                ..
            }) => {
                warn!("Model reply does not fit the response contract: {}", msg);
                Err(ExtractorError::SchemaValidation(msg))
            }
            Err(RetryError::Permanent { error, .. }) => Err(ExtractorError::Service(error.to_string())),
            Err(RetryError::Exhausted {
                last_error: AttemptError::TimedOut,
                ..
            }) => Err(ExtractorError::Timeout),
            Err(RetryError::Exhausted {
                attempts,
                last_error,
            }) => Err(ExtractorError::RetriesExhausted {
                attempts,
                last_error: last_error.to_string(),
            }),
        }
    }
}

impl<L> Engine for SemanticExtractor<L>
where
    L: LlmProvider<Error = LlmError> + Send + Sync,
{
    fn name(&self) -> &'static str {
        "semantic"
    }

    fn is_relevant(&self, text: &str) -> bool {
        has_weight_keyword(text)
    }

    async fn run(&self, text: &str, abort: &AbortSignal) -> Result<Extraction, ExtractorError> {
        self.extract(text, abort).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specscout_llm::MockProvider;

    fn extractor(provider: MockProvider) -> SemanticExtractor<MockProvider> {
        let mut config = ExtractorConfig::default();
        config.retry.jitter = 0.0;
        SemanticExtractor::new(provider, config).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ExtractorConfig::default();
        config.max_prompt_chars = 0;
        assert!(matches!(
            SemanticExtractor::new(MockProvider::default(), config),
            Err(ExtractorError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_no_keyword_never_calls_model() {
        let provider = MockProvider::default();
        let engine = extractor(provider.clone());

        let result = engine
            .extract("Frequency: 2.4 GHz\nGain: 5 dBi", &AbortSignal::new())
            .await;

        assert_eq!(result, Err(ExtractorError::NoKeywordMatch));
        assert_eq!(provider.call_count(), 0);
        assert!(!engine.is_relevant("Frequency: 2.4 GHz"));
    }

    #[tokio::test]
    async fn test_successful_extraction() {
        let provider = MockProvider::new(
            r#"{"name":" Patch P1 ","characteristics":[{"label":"Weight","value":"45 g"}]}"#,
        );
        let engine = extractor(provider.clone());

        let extraction = engine.extract("Weight: 45 g", &AbortSignal::new()).await.unwrap();

        assert_eq!(extraction.name.as_deref(), Some("Patch P1"));
        assert_eq!(extraction.weight().map(|g| g.value()), Some(45));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_name_becomes_none() {
        let provider = MockProvider::new(r#"{"name":"  ","characteristics":[]}"#);
        let extraction = extractor(provider)
            .extract("mass 3 kg", &AbortSignal::new())
            .await
            .unwrap();
        assert_eq!(extraction.name, None);
    }

    #[tokio::test]
    async fn test_unreadable_reply_is_schema_failure() {
        let provider = MockProvider::default();
        provider.push_error(LlmError::InvalidResponse("no candidate text".into()));
        let engine = extractor(provider.clone());

        let result = engine.extract("Weight: 45 g", &AbortSignal::new()).await;

        assert_eq!(
            result,
            Err(ExtractorError::SchemaValidation("no candidate text".into()))
        );
        assert_eq!(
            result.unwrap_err().outcome().label(),
            "failed:schema-validation"
        );
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_prompt_is_truncated() {
        let provider = MockProvider::default();
        let mut config = ExtractorConfig::default();
        config.max_prompt_chars = 20;
        let engine = SemanticExtractor::new(provider.clone(), config).unwrap();

        let text = format!("Weight: 45 g\n{}", "z".repeat(500));
        engine.extract(&text, &AbortSignal::new()).await.unwrap();

        let prompt = &provider.prompts()[0];
        assert!(prompt.contains("Weight: 45 g\nzzzzzzz\n---"));
        assert!(!prompt.contains(&"z".repeat(8)));
    }
}
