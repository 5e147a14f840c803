use super::openai_client::OpenAiClient;
use crate::http::failure_message;
use crate::sse::fragment_stream;
use domain::chat::{ChatMessage, ChatRequest};
use domain::services::{ChatCompletion, FragmentStream};
use serde::Serialize;
use shared::error::RagError;
use shared::types::Result;
use tracing::debug;

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    max_tokens: u32,
    stream: bool,
}

pub struct ChatClient {
    client: OpenAiClient,
    deployment: String,
}

impl ChatClient {
    pub fn new(client: OpenAiClient, deployment: &str) -> Self {
        Self {
            client,
            deployment: deployment.to_string(),
        }
    }
}

impl ChatCompletion for ChatClient {
    async fn complete_streaming(&self, request: ChatRequest) -> Result<FragmentStream> {
        let url = self
            .client
            .deployment_url(&self.deployment, "chat/completions");
        let body = ChatCompletionRequest {
            messages: &request.messages,
            temperature: request.options.temperature,
            top_p: request.options.top_p,
            max_tokens: request.options.max_output_tokens,
            stream: true,
        };
        debug!(
            deployment = %self.deployment,
            messages = request.messages.len(),
            temperature = request.options.temperature,
            max_tokens = request.options.max_output_tokens,
            "starting streamed completion"
        );
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|err| RagError::chat(err.to_string()))?;
        if !response.status().is_success() {
            return Err(RagError::chat(failure_message(response).await));
        }
        Ok(fragment_stream(response.bytes_stream()))
    }
}
