use crate::chat::ChatRequest;
use crate::models::RetrievedDocument;
use futures::stream::BoxStream;
use shared::types::Result;
use std::future::Future;

/// Text fragments of a completion in arrival order. Finite, consumed once;
/// an `Err` item is the last item the stream yields.
pub type FragmentStream = BoxStream<'static, Result<String>>;

pub trait EmbeddingProvider {
    fn embed(&self, text: &str) -> impl Future<Output = Result<Vec<f32>>> + Send;
}

pub trait VectorSearch {
    /// Nearest documents to `vector`, best first, at most `TOP_K`.
    fn search(&self, vector: &[f32]) -> impl Future<Output = Result<Vec<RetrievedDocument>>> + Send;
}

pub trait ChatCompletion {
    fn complete_streaming(
        &self,
        request: ChatRequest,
    ) -> impl Future<Output = Result<FragmentStream>> + Send;
}
