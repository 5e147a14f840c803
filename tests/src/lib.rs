//! In-memory stand-ins for the embedding, search and chat services.

use domain::chat::ChatRequest;
use domain::models::RetrievedDocument;
use domain::services::{ChatCompletion, EmbeddingProvider, FragmentStream, VectorSearch};
use futures::{stream, StreamExt};
use shared::error::RagError;
use shared::types::Result;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Deterministic vectors of a fixed dimension derived from the text bytes.
#[derive(Clone)]
pub struct FixedEmbedder {
    pub dimension: usize,
    pub calls: Arc<AtomicUsize>,
}

impl FixedEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl EmbeddingProvider for FixedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let seed: u32 = text.bytes().map(u32::from).sum();
        Ok((0..self.dimension)
            .map(|i| ((seed as usize + i) % 97) as f32 / 97.0)
            .collect())
    }
}

pub struct FailingEmbedder;

impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(RagError::embedding("401 Unauthorized: invalid key"))
    }
}

/// Returns the same documents for every vector and records what it was asked.
#[derive(Clone, Default)]
pub struct StaticSearch {
    pub documents: Vec<RetrievedDocument>,
    pub queries: Arc<Mutex<Vec<Vec<f32>>>>,
}

impl StaticSearch {
    pub fn new(documents: Vec<RetrievedDocument>) -> Self {
        Self {
            documents,
            queries: Arc::default(),
        }
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().map(|q| q.len()).unwrap_or(0)
    }
}

impl VectorSearch for StaticSearch {
    async fn search(&self, vector: &[f32]) -> Result<Vec<RetrievedDocument>> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(vector.to_vec());
        }
        Ok(self.documents.clone())
    }
}

pub struct FailingSearch;

impl VectorSearch for FailingSearch {
    async fn search(&self, _vector: &[f32]) -> Result<Vec<RetrievedDocument>> {
        Err(RagError::search("503 Service Unavailable"))
    }
}

/// Plays back scripted fragments; an `Err(message)` step ends the stream
/// with a chat failure.
#[derive(Clone, Default)]
pub struct ScriptedChat {
    pub script: Vec<std::result::Result<String, String>>,
    pub requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl ScriptedChat {
    pub fn replying(fragments: &[&str]) -> Self {
        Self {
            script: fragments.iter().map(|f| Ok(f.to_string())).collect(),
            requests: Arc::default(),
        }
    }

    pub fn failing_after(fragments: &[&str], message: &str) -> Self {
        let mut chat = Self::replying(fragments);
        chat.script.push(Err(message.to_string()));
        chat
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.requests.lock().ok().and_then(|r| r.last().cloned())
    }
}

impl ChatCompletion for ScriptedChat {
    async fn complete_streaming(&self, request: ChatRequest) -> Result<FragmentStream> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        let items: Vec<Result<String>> = self
            .script
            .iter()
            .cloned()
            .map(|step| step.map_err(RagError::chat))
            .collect();
        Ok(stream::iter(items).boxed())
    }
}

pub fn document(chunk: Option<&str>, title: Option<&str>, parent_id: Option<&str>) -> RetrievedDocument {
    RetrievedDocument {
        chunk: chunk.map(String::from),
        title: title.map(String::from),
        parent_id: parent_id.map(String::from),
        score: None,
    }
}
