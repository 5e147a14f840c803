use thiserror::Error;

/// Every failure a run can end with. Each remote service gets its own
/// variant so the caller can tell which hop broke.
#[derive(Debug, Error)]
pub enum RagError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("embedding service error: {0}")]
    EmbeddingService(String),
    #[error("search service error: {0}")]
    SearchService(String),
    #[error("chat service error: {0}")]
    ChatService(String),
    #[error("question must not be empty")]
    EmptyQuestion,
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl RagError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn embedding(message: impl Into<String>) -> Self {
        Self::EmbeddingService(message.into())
    }

    pub fn search(message: impl Into<String>) -> Self {
        Self::SearchService(message.into())
    }

    pub fn chat(message: impl Into<String>) -> Self {
        Self::ChatService(message.into())
    }
}
