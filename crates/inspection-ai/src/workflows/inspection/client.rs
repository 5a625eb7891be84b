//! Boundary to the external reasoning service. The engine and evaluator only
//! see the `ReasoningClient` trait; the Gemini REST implementation lives here
//! so tests can substitute scripted clients.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AiConfig;

use super::domain::{Speaker, TranscriptEntry};

/// One request to the reasoning service. History carries the per-question
/// transcript so the model keeps conversational context.
#[derive(Debug, Clone)]
pub struct ReasoningRequest<'a> {
    pub model: &'a str,
    pub system: &'a str,
    pub history: &'a [TranscriptEntry],
    pub message: &'a str,
}

#[derive(Debug, thiserror::Error)]
pub enum ReasoningError {
    #[error("missing API key for reasoning service")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("response contained no text")]
    EmptyResponse,
}

impl ReasoningError {
    /// Transport failures and quota/server statuses are worth retrying on a
    /// fallback model; auth and shape problems are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ReasoningError::Transport(_) => true,
            ReasoningError::Api { status, .. } => *status == 429 || *status >= 500,
            ReasoningError::MissingApiKey | ReasoningError::EmptyResponse => false,
        }
    }
}

#[async_trait]
pub trait ReasoningClient: Send + Sync {
    async fn generate(&self, request: ReasoningRequest<'_>) -> Result<String, ReasoningError>;
}

#[derive(Serialize)]
struct GenerateContentRequest {
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
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
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Gemini `generateContent` client over reqwest.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn api_key(&self) -> Result<&str, ReasoningError> {
        self.api_key.as_deref().ok_or(ReasoningError::MissingApiKey)
    }

    fn contents_for(request: &ReasoningRequest<'_>) -> Vec<Content> {
        let mut contents: Vec<Content> = request
            .history
            .iter()
            .map(|entry| Content {
                role: Some(match entry.speaker {
                    Speaker::Inspector => "model",
                    Speaker::Candidate => "user",
                }),
                parts: vec![Part {
                    text: entry.text.clone(),
                }],
            })
            .collect();

        contents.push(Content {
            role: Some("user"),
            parts: vec![Part {
                text: request.message.to_string(),
            }],
        });

        contents
    }
}

#[async_trait]
impl ReasoningClient for GeminiClient {
    async fn generate(&self, request: ReasoningRequest<'_>) -> Result<String, ReasoningError> {
        let api_key = self.api_key()?;
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url,
            request.model.trim(),
            api_key
        );

        let system_instruction = if request.system.trim().is_empty() {
            None
        } else {
            Some(Content {
                role: None,
                parts: vec![Part {
                    text: request.system.to_string(),
                }],
            })
        };

        let body = GenerateContentRequest {
            system_instruction,
            contents: Self::contents_for(&request),
            generation_config: GenerationConfig { temperature: 0.4 },
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|err| ReasoningError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReasoningError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| ReasoningError::Transport(err.to_string()))?;

        let text = parsed
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.clone())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ReasoningError::EmptyResponse);
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(ReasoningError::Transport("timed out".to_string()).is_retryable());
        assert!(ReasoningError::Api {
            status: 429,
            body: String::new()
        }
        .is_retryable());
        assert!(ReasoningError::Api {
            status: 503,
            body: String::new()
        }
        .is_retryable());
        assert!(!ReasoningError::Api {
            status: 400,
            body: String::new()
        }
        .is_retryable());
        assert!(!ReasoningError::MissingApiKey.is_retryable());
        assert!(!ReasoningError::EmptyResponse.is_retryable());
    }

    #[tokio::test]
    async fn gemini_client_requires_api_key() {
        let client = GeminiClient::new(&AiConfig::default());
        let result = client
            .generate(ReasoningRequest {
                model: "gemini-2.0-flash",
                system: "",
                history: &[],
                message: "hello",
            })
            .await;
        assert!(matches!(result, Err(ReasoningError::MissingApiKey)));
    }
}
