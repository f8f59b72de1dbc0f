//! HTTP client for the generation endpoint.

use crate::error::GenerateError;
use crate::protocol::{GENERATE_PATH, GenerateRequest, GenerateResponse, ModelId, TokenUsage};
use aura_core::PartialDocument;
use reqwest::Client;

/// Message used when a failed response carries no error of its own.
const GENERIC_FAILURE: &str = "AI generation failed";

/// A successful generation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Generation {
    pub design: Option<PartialDocument>,
    pub explanation: Option<String>,
    pub tokens: Option<TokenUsage>,
}

#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: Client,
    base_url: String,
}

impl GenerationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{GENERATE_PATH}", self.base_url.trim_end_matches('/'))
    }

    /// Ask the service for a design. An empty prompt fails before any
    /// request is made.
    pub async fn generate(&self, prompt: &str, model: ModelId) -> Result<Generation, GenerateError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(GenerateError::EmptyPrompt);
        }

        let request = GenerateRequest::new(model, prompt);
        log::debug!("requesting design from {} with {model}", self.endpoint());

        let response = self
            .http
            .post(self.endpoint())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let reported = serde_json::from_str::<GenerateResponse>(&text)
                .ok()
                .and_then(|body| body.error)
                .filter(|e| !e.is_empty());
            return Err(match reported {
                Some(error) => GenerateError::Server(error),
                None => GenerateError::Http {
                    status: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or_default().to_string(),
                },
            });
        }

        let body: GenerateResponse =
            serde_json::from_str(&text).map_err(|e| GenerateError::Parse(e.to_string()))?;

        if !body.success {
            let error = body
                .error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            return Err(GenerateError::Server(error));
        }

        let design = body
            .design
            .filter(|d| !d.is_null())
            .map(PartialDocument::from_value)
            .transpose()
            .map_err(|e| GenerateError::Parse(e.to_string()))?;

        Ok(Generation {
            design,
            explanation: body.explanation,
            tokens: body.tokens,
        })
    }
}

/// State of the most recent generation, as shown by a prompt panel.
///
/// Failures are folded into `error` and never propagated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerationSession {
    pub is_loading: bool,
    pub error: Option<String>,
    pub design: Option<PartialDocument>,
    pub tokens: Option<TokenUsage>,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn run(
        &mut self,
        client: &GenerationClient,
        prompt: &str,
        model: ModelId,
    ) -> Option<PartialDocument> {
        *self = Self {
            is_loading: true,
            ..Self::default()
        };

        match client.generate(prompt, model).await {
            Ok(generation) => {
                self.is_loading = false;
                self.design = generation.design.clone();
                self.tokens = generation.tokens;
                generation.design
            }
            Err(e) => {
                log::warn!("design generation failed: {e}");
                *self = Self {
                    error: Some(e.to_string()),
                    ..Self::default()
                };
                None
            }
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
