//! HTTP client for the image-generation endpoint

use reqwest::{header, Client};
use tracing::debug;

use super::request::{parse_response, GeneratedImage, GenerationError, GenerationRequest};
use super::{GeneratorConfig, ImageGenerator};

/// Posts generation requests as JSON and classifies the reply.
pub struct HttpImageGenerator {
    client: Client,
    endpoint: String,
}

impl HttpImageGenerator {
    /// Create a generator for the configured endpoint
    pub fn new(config: &GeneratorConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .build()
            .map_err(|e| GenerationError::transport(e.to_string()))?;
        Ok(Self::with_client(client, config))
    }

    /// Reuse an existing reqwest client
    pub fn with_client(client: Client, config: &GeneratorConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl ImageGenerator for HttpImageGenerator {
    /// POST {endpoint} - Generate one image
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedImage, GenerationError> {
        debug!(endpoint = %self.endpoint, style = %request.style, "posting generation request");
        let resp = self
            .client
            .post(&self.endpoint)
            .header(header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| GenerationError::transport(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| GenerationError::transport(e.to_string()))?;

        parse_response(status, &body)
    }
}
