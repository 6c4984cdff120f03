//! Gemini completion client
//!
//! Thin `reqwest` wrapper around the `generateContent` REST endpoint. The
//! transcript travels as role/text pairs; the catalog and credit profile
//! travel in the system instruction. Anything that goes wrong surfaces as a
//! `CompletionError` and the chat session substitutes its fallback reply.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ChatMessage, Role};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("completion transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion service misconfigured: {0}")]
    Config(String),

    #[error("malformed completion response: {0}")]
    Malformed(&'static str),
}

/// One request to the completion service: the assembled system instruction,
/// the prior transcript, and the new user message.
#[derive(Clone, Debug)]
pub struct CompletionRequest {
    pub system_instruction: String,
    pub history: Vec<ChatMessage>,
    pub message: String,
}

/// Seam between the chat session and the completion service. Tests plug in
/// canned implementations; production uses [`GeminiClient`].
pub trait CompletionClient {
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<String, CompletionError>> + Send;
}

#[derive(Clone, Debug)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Reads `GEMINI_API_KEY` (required) and `GEMINI_MODEL` (optional).
    pub fn from_env() -> Result<Self, CompletionError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| CompletionError::Config("GEMINI_API_KEY is not set".into()))?;
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self::new(api_key, model))
    }

    pub fn model(&self) -> &str { &self.model }
}

impl CompletionClient for GeminiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let url = format!("{API_BASE}/{}:generateContent", self.model);

        let mut contents: Vec<Content> = request.history.iter().map(Content::from).collect();
        contents.push(Content {
            role: wire_role(&Role::User),
            parts: vec![Part { text: request.message.clone() }],
        });

        let body = GenerateContentRequest {
            system_instruction: SystemInstruction {
                parts: vec![Part { text: request.system_instruction.clone() }],
            },
            contents,
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateContentResponse>()
            .await?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<String>()
            })
            .ok_or(CompletionError::Malformed("no candidates in response"))?;

        if text.trim().is_empty() {
            return Err(CompletionError::Malformed("candidate contained no text"));
        }
        Ok(text)
    }
}

fn wire_role(role: &Role) -> String {
    match role {
        Role::User => "user".to_string(),
        Role::Assistant => "model".to_string(),
    }
}

// Wire types for the generateContent endpoint.

#[derive(Serialize)]
struct GenerateContentRequest {
    system_instruction: SystemInstruction,
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

impl From<&ChatMessage> for Content {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: wire_role(&msg.role),
            parts: vec![Part { text: msg.text.clone() }],
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}
