use crate::providers::{AnthropicProvider, FluxProvider, OpenAIChatProvider, OpenAIImageProvider};
use crate::types::ProviderSettings;
use crate::{Error, GenerationProvider};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported generation providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Gpt,
    Claude,
    Dalle,
    Flux,
}

/// What a provider produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Text,
    Image,
}

impl ProviderId {
    pub const ALL: [ProviderId; 4] = [
        ProviderId::Gpt,
        ProviderId::Claude,
        ProviderId::Dalle,
        ProviderId::Flux,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Gpt => "gpt",
            ProviderId::Claude => "claude",
            ProviderId::Dalle => "dalle",
            ProviderId::Flux => "flux",
        }
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            ProviderId::Gpt | ProviderId::Claude => ProviderKind::Text,
            ProviderId::Dalle | ProviderId::Flux => ProviderKind::Image,
        }
    }

    pub fn is_image(&self) -> bool {
        self.kind() == ProviderKind::Image
    }

    /// Endpoint used when the configuration does not override it.
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            ProviderId::Gpt => "https://api.openai.com/v1/chat/completions",
            ProviderId::Claude => "https://api.anthropic.com/v1/messages",
            ProviderId::Dalle => "https://api.openai.com/v1/images/generations",
            ProviderId::Flux => "https://api.flux.ai/v1/images/generations",
        }
    }

    /// Model requested when the configuration does not override it.
    /// Flux takes no model parameter.
    pub fn default_model(&self) -> Option<&'static str> {
        match self {
            ProviderId::Gpt => Some("gpt-4"),
            ProviderId::Claude => Some("claude-3-sonnet"),
            ProviderId::Dalle => Some("dall-e-3"),
            ProviderId::Flux => None,
        }
    }

    /// Price in dollars per 1K tokens for text providers, per image for image providers.
    pub fn cost_rate(&self) -> f64 {
        match self {
            ProviderId::Gpt => 0.03,
            ProviderId::Claude => 0.02,
            ProviderId::Dalle => 0.04,
            ProviderId::Flux => 0.05,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gpt" => Ok(ProviderId::Gpt),
            "claude" => Ok(ProviderId::Claude),
            "dalle" => Ok(ProviderId::Dalle),
            "flux" => Ok(ProviderId::Flux),
            _ => Err(Error::invalid_provider(format!(
                "'{s}'. Valid values are: gpt, claude, dalle, flux"
            ))),
        }
    }
}

/// Factory for creating generation providers.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the provider backing `id` from its settings.
    pub fn create(
        id: ProviderId,
        settings: &ProviderSettings,
    ) -> Result<Box<dyn GenerationProvider>, Error> {
        match id {
            ProviderId::Gpt => Ok(Box::new(OpenAIChatProvider::new(settings.clone())?)),
            ProviderId::Claude => Ok(Box::new(AnthropicProvider::new(settings.clone())?)),
            ProviderId::Dalle => Ok(Box::new(OpenAIImageProvider::new(settings.clone())?)),
            ProviderId::Flux => Ok(Box::new(FluxProvider::new(settings.clone())?)),
        }
    }
}
