use super::types::{FluxRequest, FluxResponse};
use crate::provider::GenerationProvider;
use crate::providers::{http_client, post_json};
use crate::types::ProviderSettings;
use crate::Error;
use reqwest::Client;

const PROVIDER_NAME: &str = "Flux";
const IMAGE_DIMENSION: u32 = 1024;

/// Flux image generation provider.
pub struct FluxProvider {
    client: Client,
    settings: ProviderSettings,
}

impl FluxProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self, Error> {
        Ok(Self {
            client: http_client()?,
            settings,
        })
    }

    fn convert_request(&self, prompt: &str) -> FluxRequest {
        FluxRequest {
            prompt: prompt.to_string(),
            width: IMAGE_DIMENSION,
            height: IMAGE_DIMENSION,
            num_images: 1,
        }
    }
}

#[async_trait::async_trait]
impl GenerationProvider for FluxProvider {
    async fn generate(&self, prompt: &str) -> Result<String, Error> {
        let request = self.convert_request(prompt);
        // Flux accepts either header; send both.
        let builder = self
            .client
            .post(&self.settings.endpoint)
            .header("Authorization", format!("Bearer {}", self.settings.api_key))
            .header("x-api-key", &self.settings.api_key);

        let response: FluxResponse = post_json(builder, &request, PROVIDER_NAME).await?;

        response
            .images
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .ok_or_else(|| Error::protocol(PROVIDER_NAME, "response contained no image url"))
    }
}
