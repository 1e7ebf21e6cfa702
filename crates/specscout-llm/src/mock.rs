//! Mock provider for deterministic testing
//!
//! Returns scripted responses without any network access and records how and
//! when it was called, so tests can assert on call counts and retry spacing.

use crate::LlmError;
use specscout_domain::LlmProvider;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

/// Mock model provider
///
/// Scripted replies are consumed in order; once the script is empty every call
/// returns the default response. Clones share the script and call records.
///
/// # Examples
///
/// ```
/// use specscout_llm::{LlmError, MockProvider};
///
/// let provider = MockProvider::new("{}");
/// provider.push_error(LlmError::RateLimited("slow down".into()));
/// provider.push_response("first");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    state: Arc<Mutex<MockState>>,
    latency: Option<Duration>,
}

#[derive(Debug, Default)]
struct MockState {
    script: VecDeque<Result<String, LlmError>>,
    call_count: usize,
    call_instants: Vec<Instant>,
    prompts: Vec<String>,
}

impl MockProvider {
    /// Create a provider that answers every call with `response`
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            state: Arc::new(Mutex::new(MockState::default())),
            latency: None,
        }
    }

    /// Delay every call by `latency` before answering
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Queue a successful reply
    pub fn push_response(&self, response: impl Into<String>) {
        self.state().script.push_back(Ok(response.into()));
    }

    /// Queue a failing reply
    pub fn push_error(&self, error: LlmError) {
        self.state().script.push_back(Err(error));
    }

    /// Number of times the provider was called
    pub fn call_count(&self) -> usize {
        self.state().call_count
    }

    /// Reset the call count and call records
    pub fn reset_call_count(&self) {
        let mut state = self.state();
        state.call_count = 0;
        state.call_instants.clear();
        state.prompts.clear();
    }

    /// When each call started (tokio clock, so paused-time tests work)
    pub fn call_instants(&self) -> Vec<Instant> {
        self.state().call_instants.clone()
    }

    /// Prompts received, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.state().prompts.clone()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not hide the records from others
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(r#"{"name":"Mock Product","characteristics":[]}"#)
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    async fn generate_structured(&self, prompt: &str, _schema: &str) -> Result<String, Self::Error> {
        let reply = {
            let mut state = self.state();
            state.call_count += 1;
            state.call_instants.push(Instant::now());
            state.prompts.push(prompt.to_string());
            state.script.pop_front()
        };

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        match reply {
            Some(reply) => reply,
            None => Ok(self.default_response.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate_structured("any prompt", "{}").await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_script_order() {
        let provider = MockProvider::new("fallback");
        provider.push_error(LlmError::Overloaded("busy".into()));
        provider.push_response("scripted");

        let first = provider.generate_structured("p", "{}").await;
        assert!(matches!(first, Err(LlmError::Overloaded(_))));
        assert_eq!(provider.generate_structured("p", "{}").await.unwrap(), "scripted");
        assert_eq!(provider.generate_structured("p", "{}").await.unwrap(), "fallback");
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");

        assert_eq!(provider.call_count(), 0);

        provider.generate_structured("prompt1", "{}").await.unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.generate_structured("prompt2", "{}").await.unwrap();
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.prompts(), vec!["prompt1", "prompt2"]);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
        assert!(provider.call_instants().is_empty());
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate_structured("test", "{}").await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_provider_latency() {
        let provider = MockProvider::new("slow").with_latency(Duration::from_secs(5));
        let start = Instant::now();
        provider.generate_structured("p", "{}").await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(5));
    }
}
