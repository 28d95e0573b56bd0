//! Blocking streaming client for the Ollama chat API.
//!
//! `POST {host}/api/chat` with `stream: true` returns newline-delimited JSON
//! chunks; [`TokenStream`] decodes them lazily so the caller can paint each
//! token as it arrives.

use std::io::{BufRead, BufReader, Lines, Read};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request to {host} failed: {source}")]
    Request {
        host: String,
        source: Box<ureq::Error>,
    },

    #[error("Failed to read response stream: {0}")]
    Stream(#[from] std::io::Error),

    #[error("Malformed response chunk: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One entry of the conversation history sent with every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatChunk {
    #[serde(default)]
    message: Option<ChunkMessage>,
    #[serde(default)]
    done: bool,
}

#[derive(Debug, Deserialize)]
struct ChunkMessage {
    #[serde(default)]
    content: String,
}

pub struct OllamaClient {
    agent: ureq::Agent,
    host: String,
}

impl OllamaClient {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            host: host.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Sends a chat request and returns the blocking token stream.
    pub fn chat(&self, model: &str, messages: &[Message]) -> Result<TokenStream, ClientError> {
        let url = format!("{}/api/chat", self.host);
        debug!(%url, model, turns = messages.len(), "sending chat request");

        let response = self
            .agent
            .post(&url)
            .send_json(ChatRequest {
                model,
                messages,
                stream: true,
            })
            .map_err(|source| ClientError::Request {
                host: self.host.clone(),
                source: Box::new(source),
            })?;

        Ok(TokenStream::from_reader(response.into_reader()))
    }
}

/// Iterator over the answer tokens of one streamed chat response.
///
/// Ends when the server sends its `done` chunk or the connection closes;
/// transport and decode failures surface as `Err` items.
pub struct TokenStream {
    lines: Lines<BufReader<Box<dyn Read + Send + Sync + 'static>>>,
}

impl TokenStream {
    fn from_reader(reader: Box<dyn Read + Send + Sync + 'static>) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
        }
    }
}

impl Iterator for TokenStream {
    type Item = Result<String, ClientError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(source) => return Some(Err(source.into())),
            };
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<ChatChunk>(&line) {
                Ok(chunk) => {
                    if chunk.done {
                        return None;
                    }
                    match chunk.message {
                        Some(message) if !message.content.is_empty() => {
                            return Some(Ok(message.content));
                        }
                        // Keep-alive or empty chunk, read on.
                        _ => continue,
                    }
                }
                Err(source) => return Some(Err(source.into())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn stream_of(body: &str) -> TokenStream {
        TokenStream::from_reader(Box::new(Cursor::new(body.as_bytes().to_vec())))
    }

    #[test]
    fn yields_chunk_contents_in_order() {
        let body = concat!(
            "{\"message\":{\"role\":\"assistant\",\"content\":\"Hel\"},\"done\":false}\n",
            "{\"message\":{\"role\":\"assistant\",\"content\":\"lo\"},\"done\":false}\n",
            "{\"message\":{\"role\":\"assistant\",\"content\":\"\"},\"done\":true}\n",
        );

        let tokens: Vec<String> = stream_of(body).map(Result::unwrap).collect();
        assert_eq!(tokens, vec!["Hel".to_string(), "lo".to_string()]);
    }

    #[test]
    fn done_chunk_ends_the_stream() {
        let body = "{\"done\":true}\n{\"message\":{\"content\":\"never seen\"},\"done\":false}\n";
        assert!(stream_of(body).next().is_none());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let body = "\n\n{\"message\":{\"content\":\"x\"},\"done\":false}\n";
        let tokens: Vec<String> = stream_of(body).map(Result::unwrap).collect();
        assert_eq!(tokens, vec!["x".to_string()]);
    }

    #[test]
    fn malformed_chunk_is_an_error_item() {
        let mut stream = stream_of("not json\n");
        assert!(matches!(stream.next(), Some(Err(ClientError::Decode(_)))));
    }

    #[test]
    fn roles_serialize_lowercase() {
        let message = Message::user("hi");
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(json, "{\"role\":\"user\",\"content\":\"hi\"}");
    }
}
