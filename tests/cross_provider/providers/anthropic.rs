use super::{ProviderConfig, ProviderTestSetup, TEST_PROMPT};
use genchat::ProviderId;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct AnthropicTestSetup;

#[async_trait::async_trait]
impl ProviderTestSetup for AnthropicTestSetup {
    fn get_config() -> ProviderConfig {
        ProviderConfig {
            name: "Anthropic",
            id: ProviderId::Claude,
            path: "/v1/messages",
            expected: "A lighthouse stands against the violet sky.",
        }
    }

    async fn mount_generation_mocks(mock_server: &MockServer) {
        let request_payload = json!({
            "model": "claude-3-sonnet",
            "messages": [
                {"role": "user", "content": TEST_PROMPT}
            ],
            "max_tokens": 1000
        });

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-api-key"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_json(request_payload))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_123",
                "type": "message",
                "role": "assistant",
                "content": [
                    {"type": "text", "text": "A lighthouse stands against the violet sky."}
                ],
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 9, "output_tokens": 10}
            })))
            .expect(1)
            .mount(mock_server)
            .await;
    }
}
