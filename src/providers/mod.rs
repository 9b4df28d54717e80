//! Provider implementations for different generation services.

pub mod anthropic;
pub mod flux;
pub mod openai;

// Re-export commonly used provider types
pub use anthropic::AnthropicProvider;
pub use flux::FluxProvider;
pub use openai::{OpenAIChatProvider, OpenAIImageProvider};

use crate::Error;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// HTTP client shared by the provider constructors.
pub(crate) fn http_client() -> Result<Client, Error> {
    Ok(Client::builder().timeout(Duration::from_secs(60)).build()?)
}

/// Send `body` as JSON and decode the JSON reply.
///
/// A non-success status becomes [`Error::Transport`]; a success whose body
/// does not decode into `R` becomes [`Error::Protocol`].
pub(crate) async fn post_json<B, R>(
    request: RequestBuilder,
    body: &B,
    provider: &str,
) -> Result<R, Error>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let response = request
        .header("Content-Type", "application/json")
        .json(body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        debug!(provider, status = status.as_u16(), "provider returned an error status");
        return Err(Error::Transport {
            status: status.as_u16(),
            body: error_text,
        });
    }

    let text = response.text().await?;
    serde_json::from_str(&text)
        .map_err(|e| Error::protocol(provider, format!("malformed payload: {e}")))
}
