//! Remote image generation.
//!
//! - `request`: wire types for the generation POST and response classification
//! - `http`: reqwest-backed `ImageGenerator` (feature `http`)

pub mod request;

#[cfg(feature = "http")]
pub mod http;

pub use request::{
    parse_payload, parse_response, GeneratedImage, GenerationError, GenerationRequest,
};

#[cfg(feature = "http")]
pub use http::HttpImageGenerator;

/// Default generation endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.eachlabs.ai/v1/workflows";

/// Settings for reaching the generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub endpoint: String,
}

impl GeneratorConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

/// The remote collaborator that turns a request into an image reference.
///
/// One call per scene; implementations must not retry.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait ImageGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedImage, GenerationError>;
}
