use super::{ProviderConfig, ProviderTestSetup, TEST_PROMPT};
use genchat::ProviderId;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct OpenAIChatTestSetup;
pub struct OpenAIImageTestSetup;

#[async_trait::async_trait]
impl ProviderTestSetup for OpenAIChatTestSetup {
    fn get_config() -> ProviderConfig {
        ProviderConfig {
            name: "OpenAI chat",
            id: ProviderId::Gpt,
            path: "/v1/chat/completions",
            expected: "Here is a lighthouse, in words.",
        }
    }

    async fn mount_generation_mocks(mock_server: &MockServer) {
        let request_payload = json!({
            "model": "gpt-4",
            "messages": [
                {"role": "user", "content": TEST_PROMPT}
            ],
            "temperature": 0.7,
            "max_tokens": 1000
        });

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-api-key"))
            .and(body_json(request_payload))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-123",
                "object": "chat.completion",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "Here is a lighthouse, in words."},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 7, "completion_tokens": 8, "total_tokens": 15}
            })))
            .expect(1)
            .mount(mock_server)
            .await;
    }
}

#[async_trait::async_trait]
impl ProviderTestSetup for OpenAIImageTestSetup {
    fn get_config() -> ProviderConfig {
        ProviderConfig {
            name: "OpenAI images",
            id: ProviderId::Dalle,
            path: "/v1/images/generations",
            expected: "https://images.example.com/dalle/lighthouse.png",
        }
    }

    async fn mount_generation_mocks(mock_server: &MockServer) {
        let request_payload = json!({
            "model": "dall-e-3",
            "prompt": TEST_PROMPT,
            "n": 1,
            "size": "1024x1024"
        });

        Mock::given(method("POST"))
            .and(path("/v1/images/generations"))
            .and(header("authorization", "Bearer test-api-key"))
            .and(body_json(request_payload))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "created": 1700000000,
                "data": [{"url": "https://images.example.com/dalle/lighthouse.png"}]
            })))
            .expect(1)
            .mount(mock_server)
            .await;
    }
}
