use serde::{Deserialize, Serialize};

/// Flux image generation request.
#[derive(Debug, Clone, Serialize)]
pub struct FluxRequest {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub num_images: u32,
}

/// Flux image generation response.
#[derive(Debug, Clone, Deserialize)]
pub struct FluxResponse {
    #[serde(default)]
    pub images: Vec<FluxImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FluxImage {
    #[serde(default)]
    pub url: Option<String>,
}
