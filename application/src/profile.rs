use domain::chat::{ChatMessage, ChatRequest, CompletionOptions};

pub const BRIEF_SYSTEM_MESSAGE: &str = "You are a helpful assistant.";

/// How the assembled prompt is sent to the chat model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationProfile {
    /// Single user message, low temperature, room for a step-by-step answer.
    #[default]
    Grounded,
    /// System + user message pair with default sampling and a short answer.
    Brief,
}

impl GenerationProfile {
    pub fn options(self) -> CompletionOptions {
        match self {
            GenerationProfile::Grounded => CompletionOptions {
                temperature: 0.3,
                top_p: None,
                max_output_tokens: 800,
            },
            GenerationProfile::Brief => CompletionOptions {
                temperature: 1.0,
                top_p: Some(1.0),
                max_output_tokens: 100,
            },
        }
    }

    pub fn messages(self, prompt: String) -> Vec<ChatMessage> {
        match self {
            GenerationProfile::Grounded => vec![ChatMessage::user(prompt)],
            GenerationProfile::Brief => vec![
                ChatMessage::system(BRIEF_SYSTEM_MESSAGE),
                ChatMessage::user(prompt),
            ],
        }
    }

    pub fn request(self, prompt: String) -> ChatRequest {
        ChatRequest {
            messages: self.messages(prompt),
            options: self.options(),
        }
    }
}
