//! HTTP client for the external model service.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::EmbeddingError;
use super::Embedder;

#[derive(Serialize)]
struct EmbedRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

/// Embedder backed by the model service's `POST /embed` endpoint.
#[derive(Debug, Clone)]
pub struct RemoteEmbedder {
    client: reqwest::Client,
    endpoint: String,
    dim: usize,
}

impl RemoteEmbedder {
    /// `base_url` is the service root, e.g. `http://127.0.0.1:8100`.
    pub fn new(base_url: impl AsRef<str>, dim: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/embed", base_url.as_ref().trim_end_matches('/')),
            dim,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Embedder for RemoteEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        debug!(endpoint = %self.endpoint, text_len = text.len(), "requesting embedding");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&EmbedRequest { text })
            .send()
            .await?
            .error_for_status()?;

        let body: EmbedResponse =
            response
                .json()
                .await
                .map_err(|e| EmbeddingError::InvalidResponse {
                    reason: e.to_string(),
                })?;

        if body.embedding.len() != self.dim {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dim,
                actual: body.embedding.len(),
            });
        }

        Ok(body.embedding)
    }

    fn dim(&self) -> usize {
        self.dim
    }
}
