//! The remote generation client: one provider call per request.

use crate::types::ClientConfig;
use crate::{Error, GenerationProvider, ProviderFactory, ProviderId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Routes prompts to the configured provider backends.
///
/// Built from an explicit [`ClientConfig`]. Selecting a provider that has no
/// configuration entry fails with [`Error::Configuration`] before any network
/// activity.
#[derive(Clone, Default)]
pub struct GenerationClient {
    providers: HashMap<ProviderId, Arc<dyn GenerationProvider>>,
}

impl GenerationClient {
    /// Create a client with one backend per configured provider.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let mut providers: HashMap<ProviderId, Arc<dyn GenerationProvider>> = HashMap::new();
        for (id, settings) in config.iter() {
            let provider = ProviderFactory::create(id, settings)?;
            providers.insert(id, Arc::from(provider));
        }

        Ok(Self { providers })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self, Error> {
        let config = ClientConfig::from_env()?;
        Self::new(&config)
    }

    /// Use `provider` as the backend for `id`, replacing any configured one.
    pub fn with_provider(mut self, id: ProviderId, provider: Arc<dyn GenerationProvider>) -> Self {
        self.providers.insert(id, provider);
        self
    }

    pub fn is_configured(&self, id: ProviderId) -> bool {
        self.providers.contains_key(&id)
    }

    /// Generate text or an image URL for `prompt` with `provider`.
    pub async fn generate(&self, prompt: &str, provider: ProviderId) -> Result<String, Error> {
        let backend = self
            .providers
            .get(&provider)
            .ok_or_else(|| Error::config(format!("provider '{provider}' is not configured")))?;

        debug!(%provider, prompt_len = prompt.len(), "sending generation request");
        match backend.generate(prompt).await {
            Ok(result) => {
                debug!(%provider, "generation succeeded");
                Ok(result)
            }
            Err(e) => {
                warn!(%provider, error = %e, "generation failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProviderSettings;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct EchoProvider {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl GenerationProvider for EchoProvider {
        async fn generate(&self, prompt: &str) -> Result<String, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("echo: {prompt}"))
        }
    }

    #[tokio::test]
    async fn test_unconfigured_provider_fails_without_calling() {
        let echo = Arc::new(EchoProvider {
            calls: AtomicUsize::new(0),
        });
        let client = GenerationClient::default().with_provider(ProviderId::Dalle, echo.clone());

        let err = client.generate("a cat", ProviderId::Flux).await.unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("flux"));
        assert_eq!(echo.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_result_is_passed_through() {
        let echo = Arc::new(EchoProvider {
            calls: AtomicUsize::new(0),
        });
        let client = GenerationClient::default().with_provider(ProviderId::Gpt, echo.clone());

        let text = client.generate("hello", ProviderId::Gpt).await.unwrap();
        assert_eq!(text, "echo: hello");
        assert_eq!(echo.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_new_builds_configured_providers() {
        let config = ClientConfig::new()
            .with_provider(ProviderId::Gpt, ProviderSettings::new(ProviderId::Gpt, "k").unwrap());
        let client = GenerationClient::new(&config).unwrap();
        assert!(client.is_configured(ProviderId::Gpt));
        assert!(!client.is_configured(ProviderId::Claude));
    }
}
