use crate::profile::GenerationProfile;
use crate::prompt::build_prompt;
use domain::models::{Citation, Retrieval, RunStage};
use domain::services::{ChatCompletion, EmbeddingProvider, FragmentStream, VectorSearch};
use shared::telemetry::Telemetry;
use shared::types::Result;
use tracing::{info, warn};

/// A started answer: the fragment stream still has to be drained, the
/// citations are already known.
pub struct Answer {
    pub fragments: FragmentStream,
    pub citations: Vec<Citation>,
    pub prompt: String,
}

pub struct RagService<E, S, C> {
    embedder: E,
    search: S,
    chat: C,
    profile: GenerationProfile,
}

impl<E, S, C> RagService<E, S, C>
where
    E: EmbeddingProvider,
    S: VectorSearch,
    C: ChatCompletion,
{
    pub fn new(embedder: E, search: S, chat: C) -> Self {
        Self {
            embedder,
            search,
            chat,
            profile: GenerationProfile::default(),
        }
    }

    pub fn with_profile(mut self, profile: GenerationProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Embed the question and fetch its nearest documents.
    pub async fn retrieve(&self, question: &str) -> Result<Retrieval> {
        let telemetry = Telemetry::new();
        info!(stage = %RunStage::Embedding, "embedding question");
        let vector = self
            .embedder
            .embed(question)
            .await
            .inspect_err(|err| warn!(stage = %RunStage::Embedding, error = %err, "run aborted"))?;
        info!(
            stage = %RunStage::Embedding,
            dimension = vector.len(),
            elapsed_ms = telemetry.elapsed_ms() as u64,
            "question embedded"
        );

        let telemetry = Telemetry::new();
        info!(stage = %RunStage::Searching, "querying vector index");
        let documents = self
            .search
            .search(&vector)
            .await
            .inspect_err(|err| warn!(stage = %RunStage::Searching, error = %err, "run aborted"))?;
        let retrieval = Retrieval::new(documents);
        info!(
            stage = %RunStage::Searching,
            documents = retrieval.documents.len(),
            elapsed_ms = telemetry.elapsed_ms() as u64,
            "documents retrieved"
        );
        Ok(retrieval)
    }

    /// Run retrieval and start streaming the completion.
    pub async fn answer(&self, question: &str) -> Result<Answer> {
        let retrieval = self.retrieve(question).await?;
        let prompt = build_prompt(&retrieval.context_text(), question);
        let request = self.profile.request(prompt.clone());

        info!(stage = %RunStage::Generating, profile = ?self.profile, "requesting completion");
        let fragments = self
            .chat
            .complete_streaming(request)
            .await
            .inspect_err(|err| warn!(stage = %RunStage::Generating, error = %err, "run aborted"))?;

        Ok(Answer {
            fragments,
            citations: retrieval.citations(),
            prompt,
        })
    }
}
