use crate::config::SearchSettings;
use crate::http::failure_message;
use domain::models::{RetrievedDocument, TOP_K, VECTOR_FIELD};
use domain::services::VectorSearch;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared::error::RagError;
use shared::types::Result;
use std::sync::Arc;
use tracing::debug;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    top: usize,
    vector_queries: Vec<VectorQuery<'a>>,
}

#[derive(Serialize)]
struct VectorQuery<'a> {
    kind: &'static str,
    vector: &'a [f32],
    fields: &'static str,
    k: usize,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    value: Vec<Map<String, Value>>,
}

/// Pure vector query against one index of a hosted search service.
#[derive(Clone)]
pub struct SearchClient {
    client: Arc<Client>,
    url: String,
    api_key: String,
    api_version: String,
}

impl SearchClient {
    pub fn new(settings: &SearchSettings) -> Self {
        Self {
            client: Arc::new(Client::new()),
            url: format!(
                "{}/indexes/{}/docs/search",
                settings.service_url.trim_end_matches('/'),
                settings.index_name
            ),
            api_key: settings.api_key.clone(),
            api_version: settings.api_version.clone(),
        }
    }

    pub async fn find_nearest(&self, vector: &[f32]) -> Result<Vec<RetrievedDocument>> {
        let request = SearchRequest {
            top: TOP_K,
            vector_queries: vec![VectorQuery {
                kind: "vector",
                vector,
                fields: VECTOR_FIELD,
                k: TOP_K,
            }],
        };
        debug!(url = %self.url, dimension = vector.len(), k = TOP_K, "vector search");
        let response = self
            .client
            .post(&self.url)
            .header("api-key", &self.api_key)
            .query(&[("api-version", self.api_version.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|err| RagError::search(err.to_string()))?;
        if !response.status().is_success() {
            return Err(RagError::search(failure_message(response).await));
        }
        let body: SearchResponse = response
            .json()
            .await
            .map_err(|err| RagError::search(format!("malformed response: {err}")))?;

        if body.value.len() > TOP_K {
            debug!(returned = body.value.len(), "dropping hits past the top {}", TOP_K);
        }
        Ok(body.value.iter().take(TOP_K).map(to_document).collect())
    }
}

impl VectorSearch for SearchClient {
    async fn search(&self, vector: &[f32]) -> Result<Vec<RetrievedDocument>> {
        self.find_nearest(vector).await
    }
}

fn to_document(hit: &Map<String, Value>) -> RetrievedDocument {
    RetrievedDocument {
        chunk: text_field(hit, "chunk"),
        title: text_field(hit, "title"),
        parent_id: text_field(hit, "parent_id"),
        score: hit.get("@search.score").and_then(Value::as_f64),
    }
}

// Null counts as absent; other scalars are kept in their JSON text form.
fn text_field(hit: &Map<String, Value>, name: &str) -> Option<String> {
    match hit.get(name)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
