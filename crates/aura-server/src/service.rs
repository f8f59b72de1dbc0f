//! The `/api/ai-generate` endpoint.
//!
//! Validation runs in a fixed order (prompt, model, credentials) before
//! the upstream is contacted. Every failure becomes a
//! `{success: false, error}` body with the status from
//! [`ServiceError::status`].

use aura_gen::extract::{ExtractError, extract_design_json, has_recognized_field};
use aura_gen::protocol::GENERATE_PATH;
use aura_gen::{GenerateResponse, ModelId};
use serde_json::Value;
use thiserror::Error;

use crate::backend::{BackendError, CompletionBackend, CompletionRequest};

/// Instructions sent ahead of every user prompt.
pub const SYSTEM_PROMPT: &str = r#"You are an expert UI/UX designer assistant. Your task is to generate CSS properties and design updates based on user descriptions.

When the user describes a design, respond ONLY with a valid JSON object (no markdown, no code blocks) containing design properties. Use this structure:

{
  "elementTag": "div|section|h1-h6|p|span|button|etc",
  "textContent": "generated text if applicable",
  "size": { "width": "value", "height": "value", "maxWidth": "value", "maxHeight": "value" },
  "padding": { "top": "value", "right": "value", "bottom": "value", "left": "value" },
  "margin": { "top": "value", "right": "value", "bottom": "value", "left": "value" },
  "typography": { "fontFamily": "value", "fontSize": "value", "fontWeight": "value", "textAlign": "value", "lineHeight": "value", "letterSpacing": "value" },
  "background": { "type": "solid|linear|radial", "color": "value", "gradient": { "from": "value", "to": "value", "angle": 90 } },
  "border": { "color": "value", "width": "value", "radius": "value" },
  "transforms": { "translateX": 0, "translateY": 0, "rotate": 0, "scale": 100, "skewX": 0, "skewY": 0 },
  "transforms3d": { "rotateX": 0, "rotateY": 0, "rotateZ": 0, "perspective": 0 },
  "opacity": 100,
  "blur": 0,
  "backdropBlur": 0
}

Rules:
- Only include properties that make sense for the design
- Use Tailwind-compatible values (e.g., "16" for padding, "20" for font-size)
- Use hex colors or rgb/hsl formats for colors
- Use numeric values for transforms (degrees for rotate, pixels for translate)
- Scale should be 0-200 (percentage)
- Opacity should be 0-100 (percentage)
- Focus on creating a cohesive, professional design"#;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("Prompt is required and must be non-empty")]
    MissingPrompt,
    #[error("Invalid model specified")]
    InvalidModel,
    #[error("OpenAI API key not configured. Please set OPENAI_API_KEY environment variable.")]
    NotConfigured,
    #[error("OpenAI API error: {0}")]
    Upstream(#[from] BackendError),
    #[error("Empty response from OpenAI")]
    EmptyResponse,
    #[error("Failed to parse AI response: {0}")]
    Unparseable(#[from] ExtractError),
    #[error("Generated design data is invalid")]
    InvalidDesign,
    #[error("Not found")]
    NotFound,
}

impl ServiceError {
    pub fn status(&self) -> u16 {
        match self {
            Self::MissingPrompt | Self::InvalidModel => 400,
            Self::NotFound => 404,
            Self::Upstream(_) => 502,
            Self::NotConfigured | Self::EmptyResponse | Self::Unparseable(_) | Self::InvalidDesign => {
                500
            }
        }
    }
}

/// Status code plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: GenerateResponse,
}

impl From<ServiceError> for Reply {
    fn from(e: ServiceError) -> Self {
        Reply {
            status: e.status(),
            body: GenerateResponse::failure(e.to_string()),
        }
    }
}

/// Request router. `backend` is `None` when no credential is configured.
pub struct Service<B> {
    backend: Option<B>,
}

impl<B: CompletionBackend> Service<B> {
    pub fn new(backend: Option<B>) -> Self {
        Self { backend }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    pub async fn handle(&self, method: &str, path: &str, body: &str) -> Reply {
        let path = path.split('?').next().unwrap_or_default();
        if method != "POST" || path != GENERATE_PATH {
            log::info!("{method} {path} -> 404");
            return ServiceError::NotFound.into();
        }

        let reply = match self.generate(body).await {
            Ok(reply) => reply,
            Err(e) => {
                if e.status() >= 500 {
                    log::error!("generation failed: {e}");
                }
                e.into()
            }
        };
        log::info!("{method} {path} -> {}", reply.status);
        reply
    }

    async fn generate(&self, body: &str) -> Result<Reply, ServiceError> {
        let request: Value = serde_json::from_str(body).unwrap_or(Value::Null);

        let prompt = request
            .get("prompt")
            .and_then(Value::as_str)
            .filter(|p| !p.trim().is_empty())
            .ok_or(ServiceError::MissingPrompt)?;

        let model: ModelId = request
            .get("model")
            .and_then(Value::as_str)
            .and_then(|m| m.parse().ok())
            .ok_or(ServiceError::InvalidModel)?;

        let backend = self.backend.as_ref().ok_or(ServiceError::NotConfigured)?;

        let completion = backend
            .complete(CompletionRequest {
                model,
                system: SYSTEM_PROMPT,
                prompt,
            })
            .await?;

        if completion.content.is_empty() {
            return Err(ServiceError::EmptyResponse);
        }

        let design = extract_design_json(&completion.content)?;
        if !has_recognized_field(&design) {
            return Err(ServiceError::InvalidDesign);
        }

        Ok(Reply {
            status: 200,
            body: GenerateResponse::success(design, model, completion.usage),
        })
    }
}
