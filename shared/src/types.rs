use crate::error::RagError;

pub type Result<T> = std::result::Result<T, RagError>;
