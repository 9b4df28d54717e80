pub mod anthropic;
pub mod flux;
pub mod openai;

use genchat::ProviderId;
use wiremock::MockServer;

/// Fixed prompt every provider mock expects.
pub const TEST_PROMPT: &str = "Draw a lighthouse at dusk";

/// Provider configuration for cross-provider testing
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub name: &'static str,
    pub id: ProviderId,
    /// Path the provider posts to, relative to the mock server root.
    pub path: &'static str,
    /// Normalized result the client should return for the mocked reply.
    pub expected: &'static str,
}

/// Trait for provider-specific test setup
#[async_trait::async_trait]
pub trait ProviderTestSetup {
    /// Get the provider configuration
    fn get_config() -> ProviderConfig;

    /// Mount a mock that only answers the exact request the provider should send
    async fn mount_generation_mocks(mock_server: &MockServer);
}
