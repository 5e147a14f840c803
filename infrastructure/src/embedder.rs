use super::openai_client::OpenAiClient;
use crate::http::failure_message;
use domain::services::EmbeddingProvider;
use serde::{Deserialize, Serialize};
use shared::error::RagError;
use shared::types::Result;
use tracing::debug;

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

pub struct Embedder {
    client: OpenAiClient,
    deployment: String,
    dimensions: Option<usize>,
}

impl Embedder {
    pub fn new(client: OpenAiClient, deployment: &str, dimensions: Option<usize>) -> Self {
        Self {
            client,
            deployment: deployment.to_string(),
            dimensions,
        }
    }

    pub async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(RagError::embedding("cannot embed empty text"));
        }
        let url = self.client.deployment_url(&self.deployment, "embeddings");
        debug!(deployment = %self.deployment, chars = text.len(), "requesting embedding");
        let response = self
            .client
            .post(&url)
            .json(&EmbeddingRequest { input: text })
            .send()
            .await
            .map_err(|err| RagError::embedding(err.to_string()))?;
        if !response.status().is_success() {
            return Err(RagError::embedding(failure_message(response).await));
        }
        let body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|err| RagError::embedding(format!("malformed response: {err}")))?;

        let vector = body
            .data
            .into_iter()
            .next()
            .map(|data| data.embedding)
            .filter(|vector| !vector.is_empty())
            .ok_or_else(|| RagError::embedding("response carried no embedding"))?;
        if let Some(expected) = self.dimensions {
            if vector.len() != expected {
                return Err(RagError::embedding(format!(
                    "expected embedding dimension {expected}, got {}",
                    vector.len()
                )));
            }
        }
        Ok(vector)
    }
}

impl EmbeddingProvider for Embedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.generate_embedding(text).await
    }
}
