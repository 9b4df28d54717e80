use crate::{Error, ProviderId};
use std::collections::HashMap;
use std::env;
use std::fmt;
use tracing::warn;

/// Endpoint, credential and model for one provider.
#[derive(Clone, PartialEq)]
pub struct ProviderSettings {
    pub endpoint: String,
    pub api_key: String,
    pub model: Option<String>,
}

// The key never appears in logs or panic messages.
impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

impl ProviderSettings {
    /// Settings pointing at the provider's public endpoint with its default model.
    ///
    /// A blank API key is rejected here rather than surfacing later as an
    /// authentication failure from the provider.
    pub fn new(id: ProviderId, api_key: impl Into<String>) -> Result<Self, Error> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::config(format!("API key for {id} must not be empty")));
        }

        Ok(Self {
            endpoint: id.default_endpoint().to_string(),
            api_key,
            model: id.default_model().map(str::to_string),
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Static mapping from provider id to its settings.
///
/// Passed to the generation client at construction; a provider missing here
/// is a configuration error for any request that selects it.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    providers: HashMap<ProviderId, ProviderSettings>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, id: ProviderId, settings: ProviderSettings) -> Self {
        self.insert(id, settings);
        self
    }

    pub fn insert(&mut self, id: ProviderId, settings: ProviderSettings) {
        self.providers.insert(id, settings);
    }

    pub fn get(&self, id: ProviderId) -> Option<&ProviderSettings> {
        self.providers.get(&id)
    }

    pub fn is_configured(&self, id: ProviderId) -> bool {
        self.providers.contains_key(&id)
    }

    /// Configured provider ids in declaration order.
    pub fn configured(&self) -> Vec<ProviderId> {
        let mut ids: Vec<ProviderId> = self.providers.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProviderId, &ProviderSettings)> {
        self.providers.iter().map(|(id, settings)| (*id, settings))
    }

    /// Create configuration from environment variables.
    ///
    /// `OPENAI_API_KEY` enables gpt and dalle, `ANTHROPIC_API_KEY` enables
    /// claude, `FLUX_API_KEY` enables flux. `OPENAI_BASE_URL`,
    /// `ANTHROPIC_BASE_URL` and `FLUX_BASE_URL` override the API roots.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`] but reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        let sources = [
            (ProviderId::Gpt, "OPENAI_API_KEY", "OPENAI_BASE_URL", "/chat/completions"),
            (ProviderId::Dalle, "OPENAI_API_KEY", "OPENAI_BASE_URL", "/images/generations"),
            (ProviderId::Claude, "ANTHROPIC_API_KEY", "ANTHROPIC_BASE_URL", "/messages"),
            (ProviderId::Flux, "FLUX_API_KEY", "FLUX_BASE_URL", "/images/generations"),
        ];

        for (id, key_var, base_var, path) in sources {
            let Some(api_key) = lookup(key_var) else {
                continue;
            };
            if api_key.trim().is_empty() {
                warn!("{key_var} is set but empty, leaving {id} unconfigured");
                continue;
            }

            let mut settings = ProviderSettings::new(id, api_key)?;
            if let Some(base_url) = lookup(base_var) {
                settings = settings.with_endpoint(format!("{}{path}", base_url.trim_end_matches('/')));
            }
            config.insert(id, settings);
        }

        if config.providers.is_empty() {
            return Err(Error::config(
                "No provider credentials found in environment. Set OPENAI_API_KEY, ANTHROPIC_API_KEY or FLUX_API_KEY",
            ));
        }

        Ok(config)
    }
}
