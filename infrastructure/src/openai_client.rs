use crate::chat_client::ChatClient;
use crate::config::OpenAiSettings;
use crate::embedder::Embedder;
use reqwest::{Client, RequestBuilder};
use std::sync::Arc;

/// Connection to an Azure-style OpenAI resource. Cheap to clone; the
/// embedding and chat clients share one HTTP pool.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Arc<Client>,
    endpoint: String,
    api_key: String,
    api_version: String,
}

impl OpenAiClient {
    pub fn new(settings: &OpenAiSettings) -> Self {
        Self {
            client: Arc::new(Client::new()),
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            api_version: settings.api_version.clone(),
        }
    }

    pub fn embedder(&self, deployment: &str, dimensions: Option<usize>) -> Embedder {
        Embedder::new(self.clone(), deployment, dimensions)
    }

    pub fn chat(&self, deployment: &str) -> ChatClient {
        ChatClient::new(self.clone(), deployment)
    }

    pub(crate) fn deployment_url(&self, deployment: &str, operation: &str) -> String {
        format!(
            "{}/openai/deployments/{}/{}",
            self.endpoint, deployment, operation
        )
    }

    pub(crate) fn post(&self, url: &str) -> RequestBuilder {
        self.client
            .post(url)
            .header("api-key", &self.api_key)
            .query(&[("api-version", self.api_version.as_str())])
    }
}
