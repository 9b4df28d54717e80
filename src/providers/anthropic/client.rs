use super::types::{AnthropicMessage, AnthropicRequest, AnthropicResponse};
use crate::provider::GenerationProvider;
use crate::providers::{http_client, post_json};
use crate::types::ProviderSettings;
use crate::Error;
use reqwest::Client;

const PROVIDER_NAME: &str = "Anthropic";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1000;

/// Anthropic Claude provider using the Messages API.
pub struct AnthropicProvider {
    client: Client,
    settings: ProviderSettings,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider.
    pub fn new(settings: ProviderSettings) -> Result<Self, Error> {
        Ok(Self {
            client: http_client()?,
            settings,
        })
    }

    /// Convert a prompt to Anthropic format.
    fn convert_request(&self, prompt: &str) -> AnthropicRequest {
        AnthropicRequest {
            model: self
                .settings
                .model
                .clone()
                .unwrap_or_else(|| "claude-3-sonnet".to_string()),
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: MAX_TOKENS,
        }
    }
}

#[async_trait::async_trait]
impl GenerationProvider for AnthropicProvider {
    async fn generate(&self, prompt: &str) -> Result<String, Error> {
        let request = self.convert_request(prompt);
        let builder = self
            .client
            .post(&self.settings.endpoint)
            .header("x-api-key", &self.settings.api_key)
            .header("anthropic-version", API_VERSION);

        let response: AnthropicResponse = post_json(builder, &request, PROVIDER_NAME).await?;

        // The first block carrying text is the completion; tool blocks are never requested.
        response
            .content
            .into_iter()
            .find_map(|block| block.text)
            .ok_or_else(|| Error::protocol(PROVIDER_NAME, "response contained no text block"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderId;

    #[test]
    fn test_request_conversion() {
        let settings = ProviderSettings::new(ProviderId::Claude, "test-key").unwrap();
        let provider = AnthropicProvider::new(settings).unwrap();

        let request = provider.convert_request("Explain borrowing");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "claude-3-sonnet",
                "messages": [{"role": "user", "content": "Explain borrowing"}],
                "max_tokens": 1000
            })
        );
    }

    #[test]
    fn test_response_parsing_skips_non_text_blocks() {
        let raw = r#"{"content":[{"type":"thinking"},{"type":"text","text":"Hi"}]}"#;
        let response: AnthropicResponse = serde_json::from_str(raw).unwrap();
        let text = response.content.into_iter().find_map(|b| b.text);
        assert_eq!(text.as_deref(), Some("Hi"));
    }
}
