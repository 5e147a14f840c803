use std::fmt;

/// Nearest neighbours requested from the index, and the most documents a
/// single run will ever carry.
pub const TOP_K: usize = 3;

/// Index field the query vector is matched against.
pub const VECTOR_FIELD: &str = "text_vector";

pub const NO_TITLE: &str = "No Title";
pub const NO_DOCUMENTS: &str = "No documents found.";

/// One search hit. Every stored field is optional; the index may not
/// carry all of them for every chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrievedDocument {
    pub chunk: Option<String>,
    pub title: Option<String>,
    pub parent_id: Option<String>,
    pub score: Option<f64>,
}

impl RetrievedDocument {
    pub fn citation(&self) -> Citation {
        Citation {
            title: self.title.clone().unwrap_or_else(|| NO_TITLE.to_string()),
            parent_id: self.parent_id.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub title: String,
    pub parent_id: String,
}

/// Documents returned for one question, in ranking order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Retrieval {
    pub documents: Vec<RetrievedDocument>,
}

impl Retrieval {
    pub fn new(mut documents: Vec<RetrievedDocument>) -> Self {
        documents.truncate(TOP_K);
        Self { documents }
    }

    /// Chunk texts joined by a blank line. Documents without a chunk are
    /// skipped; with nothing to join the placeholder is returned.
    pub fn context_text(&self) -> String {
        let chunks: Vec<&str> = self
            .documents
            .iter()
            .filter_map(|doc| doc.chunk.as_deref())
            .collect();
        if chunks.is_empty() {
            NO_DOCUMENTS.to_string()
        } else {
            chunks.join("\n\n")
        }
    }

    pub fn citations(&self) -> Vec<Citation> {
        self.documents.iter().map(RetrievedDocument::citation).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    AwaitingQuery,
    Embedding,
    Searching,
    Generating,
    Presenting,
    Done,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunStage::AwaitingQuery => "awaiting query",
            RunStage::Embedding => "embedding",
            RunStage::Searching => "searching",
            RunStage::Generating => "generating",
            RunStage::Presenting => "presenting",
            RunStage::Done => "done",
        };
        f.write_str(name)
    }
}
