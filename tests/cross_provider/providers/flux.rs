use super::{ProviderConfig, ProviderTestSetup, TEST_PROMPT};
use genchat::ProviderId;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct FluxTestSetup;

#[async_trait::async_trait]
impl ProviderTestSetup for FluxTestSetup {
    fn get_config() -> ProviderConfig {
        ProviderConfig {
            name: "Flux",
            id: ProviderId::Flux,
            path: "/v1/images/generations",
            expected: "https://cdn.flux.example/lighthouse.webp",
        }
    }

    async fn mount_generation_mocks(mock_server: &MockServer) {
        let request_payload = json!({
            "prompt": TEST_PROMPT,
            "width": 1024,
            "height": 1024,
            "num_images": 1
        });

        Mock::given(method("POST"))
            .and(path("/v1/images/generations"))
            .and(header("authorization", "Bearer test-api-key"))
            .and(header("x-api-key", "test-api-key"))
            .and(body_json(request_payload))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "images": [{"url": "https://cdn.flux.example/lighthouse.webp", "seed": 42}]
            })))
            .expect(1)
            .mount(mock_server)
            .await;
    }
}
