pub mod profile;
pub mod prompt;
pub mod rag_service;
