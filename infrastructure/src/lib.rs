pub mod chat_client;
pub mod config;
pub mod embedder;
mod http;
pub mod openai_client;
pub mod search;
pub mod sse;
