use genchat::{ClientConfig, Error, GenerationClient, ProviderId, ProviderSettings};
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::providers::{
    anthropic::AnthropicTestSetup,
    flux::FluxTestSetup,
    openai::{OpenAIChatTestSetup, OpenAIImageTestSetup},
    ProviderTestSetup, TEST_PROMPT,
};

/// Client with a single provider pointed at the mock server.
fn client_for(id: ProviderId, mock_server: &MockServer, path: &str) -> GenerationClient {
    let settings = ProviderSettings::new(id, "test-api-key")
        .expect("valid settings")
        .with_endpoint(format!("{}{}", mock_server.uri(), path));
    let config = ClientConfig::new().with_provider(id, settings);
    GenerationClient::new(&config).expect("Failed to create client")
}

/// Run the generation e2e test for a specific provider
async fn run_generation_test<T: ProviderTestSetup>() {
    let config = T::get_config();
    let mock_server = MockServer::start().await;
    T::mount_generation_mocks(&mock_server).await;

    let client = client_for(config.id, &mock_server, config.path);
    let result = client
        .generate(TEST_PROMPT, config.id)
        .await
        .unwrap_or_else(|e| panic!("{}: generation failed: {e}", config.name));

    assert_eq!(result, config.expected, "{}: unexpected result", config.name);
}

/// A non-2xx reply must surface as a transport error carrying the status.
async fn run_error_status_test<T: ProviderTestSetup>() {
    let config = T::get_config();
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({"error": {"message": "slow down"}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(config.id, &mock_server, config.path);
    let err = client.generate(TEST_PROMPT, config.id).await.unwrap_err();

    match err {
        Error::Transport { status, body } => {
            assert_eq!(status, 429, "{}", config.name);
            assert!(body.contains("slow down"), "{}", config.name);
        }
        other => panic!("{}: expected transport error, got {other:?}", config.name),
    }
}

/// A 2xx reply with the wrong shape must surface as a protocol error.
async fn run_malformed_payload_test<T: ProviderTestSetup>() {
    let config = T::get_config();
    for body in [json!({"unexpected": true}), json!([1, 2, 3])] {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&mock_server)
            .await;

        let client = client_for(config.id, &mock_server, config.path);
        let err = client.generate(TEST_PROMPT, config.id).await.unwrap_err();
        assert!(
            matches!(err, Error::Protocol { .. }),
            "{}: expected protocol error, got {err:?}",
            config.name
        );
    }
}

#[tokio::test]
async fn test_openai_chat_generation_e2e() {
    run_generation_test::<OpenAIChatTestSetup>().await;
    run_error_status_test::<OpenAIChatTestSetup>().await;
    run_malformed_payload_test::<OpenAIChatTestSetup>().await;
}

#[tokio::test]
async fn test_openai_image_generation_e2e() {
    run_generation_test::<OpenAIImageTestSetup>().await;
    run_error_status_test::<OpenAIImageTestSetup>().await;
    run_malformed_payload_test::<OpenAIImageTestSetup>().await;
}

#[tokio::test]
async fn test_anthropic_generation_e2e() {
    run_generation_test::<AnthropicTestSetup>().await;
    run_error_status_test::<AnthropicTestSetup>().await;
    run_malformed_payload_test::<AnthropicTestSetup>().await;
}

#[tokio::test]
async fn test_flux_generation_e2e() {
    run_generation_test::<FluxTestSetup>().await;
    run_error_status_test::<FluxTestSetup>().await;
    run_malformed_payload_test::<FluxTestSetup>().await;
}

#[tokio::test]
async fn test_unconfigured_provider_makes_no_call() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(ProviderId::Dalle, &mock_server, "/v1/images/generations");
    let err = client
        .generate(TEST_PROMPT, ProviderId::Flux)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}
