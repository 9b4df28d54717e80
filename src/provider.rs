use crate::Error;

/// A configured generation backend.
///
/// Each call performs exactly one outbound request. Text providers return the
/// completion text, image providers return the URL of the generated image.
#[async_trait::async_trait]
pub trait GenerationProvider: Send + Sync + 'static {
    /// Generate a result for a single prompt.
    async fn generate(&self, prompt: &str) -> Result<String, Error>;
}
