use super::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ImageGenerationRequest,
    ImageGenerationResponse,
};
use crate::provider::GenerationProvider;
use crate::providers::{http_client, post_json};
use crate::types::ProviderSettings;
use crate::Error;
use reqwest::Client;

const PROVIDER_NAME: &str = "OpenAI";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1000;
const IMAGE_SIZE: &str = "1024x1024";

/// OpenAI Chat Completions provider.
pub struct OpenAIChatProvider {
    client: Client,
    settings: ProviderSettings,
}

impl OpenAIChatProvider {
    /// Create a new OpenAI chat provider.
    pub fn new(settings: ProviderSettings) -> Result<Self, Error> {
        Ok(Self {
            client: http_client()?,
            settings,
        })
    }

    /// Build the request body for a single user prompt.
    fn convert_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self
                .settings
                .model
                .clone()
                .unwrap_or_else(|| "gpt-4".to_string()),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: Some(TEMPERATURE),
            max_tokens: Some(MAX_TOKENS),
        }
    }
}

#[async_trait::async_trait]
impl GenerationProvider for OpenAIChatProvider {
    async fn generate(&self, prompt: &str) -> Result<String, Error> {
        let request = self.convert_request(prompt);
        let builder = self
            .client
            .post(&self.settings.endpoint)
            .header("Authorization", format!("Bearer {}", self.settings.api_key));

        let response: ChatCompletionResponse = post_json(builder, &request, PROVIDER_NAME).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::protocol(PROVIDER_NAME, "response contained no message content"))
    }
}

/// OpenAI Images provider (DALL-E).
pub struct OpenAIImageProvider {
    client: Client,
    settings: ProviderSettings,
}

impl OpenAIImageProvider {
    /// Create a new OpenAI image provider.
    pub fn new(settings: ProviderSettings) -> Result<Self, Error> {
        Ok(Self {
            client: http_client()?,
            settings,
        })
    }

    fn convert_request(&self, prompt: &str) -> ImageGenerationRequest {
        ImageGenerationRequest {
            model: self
                .settings
                .model
                .clone()
                .unwrap_or_else(|| "dall-e-3".to_string()),
            prompt: prompt.to_string(),
            n: 1,
            size: IMAGE_SIZE.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl GenerationProvider for OpenAIImageProvider {
    async fn generate(&self, prompt: &str) -> Result<String, Error> {
        let request = self.convert_request(prompt);
        let builder = self
            .client
            .post(&self.settings.endpoint)
            .header("Authorization", format!("Bearer {}", self.settings.api_key));

        let response: ImageGenerationResponse = post_json(builder, &request, PROVIDER_NAME).await?;

        response
            .data
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .ok_or_else(|| Error::protocol(PROVIDER_NAME, "response contained no image url"))
    }
}
