use bytes::Bytes;
use domain::services::FragmentStream;
use eventsource_stream::Eventsource;
use futures::{future, Stream, StreamExt};
use serde::Deserialize;
use shared::error::RagError;
use std::fmt;

#[derive(Deserialize, Debug)]
struct ChatCompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    #[serde(default)]
    error: Option<ChunkError>,
}

#[derive(Deserialize, Debug)]
struct ChunkChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Deserialize, Debug, Default)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ChunkError {
    message: String,
}

#[derive(Debug, PartialEq)]
pub enum SseEvent {
    Fragment(String),
    Skip,
    Done,
    Failed(String),
}

pub fn decode_event(data: &str) -> SseEvent {
    let data = data.trim();
    if data.is_empty() {
        return SseEvent::Skip;
    }
    if data == "[DONE]" {
        return SseEvent::Done;
    }
    match serde_json::from_str::<ChatCompletionChunk>(data) {
        Ok(chunk) => {
            if let Some(error) = chunk.error {
                return SseEvent::Failed(error.message);
            }
            match chunk
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.delta.content)
            {
                Some(text) if !text.is_empty() => SseEvent::Fragment(text),
                _ => SseEvent::Skip,
            }
        }
        Err(err) => SseEvent::Failed(format!("undecodable stream event: {err}")),
    }
}

/// Turn a server-sent-event body into completion fragments. The stream ends
/// at `[DONE]`, at the end of the body, or right after the first error.
pub fn fragment_stream<S, E>(body: S) -> FragmentStream
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: fmt::Display + Send + 'static,
{
    body.eventsource()
        .scan(false, |failed, event| {
            if *failed {
                return future::ready(None);
            }
            let item = match event {
                Ok(event) => match decode_event(&event.data) {
                    SseEvent::Fragment(text) => Some(Ok(text)),
                    SseEvent::Skip => None,
                    SseEvent::Done => return future::ready(None),
                    SseEvent::Failed(message) => {
                        *failed = true;
                        Some(Err(RagError::chat(message)))
                    }
                },
                Err(err) => {
                    *failed = true;
                    Some(Err(RagError::chat(format!("stream interrupted: {err}"))))
                }
            };
            future::ready(Some(item))
        })
        .filter_map(future::ready)
        .boxed()
}
