//! Design-generation service for the Aura inspector.
//!
//! Accepts `POST /api/ai-generate`, forwards the prompt to a chat-completion
//! model, and returns the extracted design as a partial document.

pub mod backend;
pub mod config;
pub mod server;
pub mod service;

pub use backend::{BackendError, Completion, CompletionBackend, CompletionRequest, OpenAiBackend};
pub use config::ServerConfig;
pub use server::serve;
pub use service::{Reply, Service, ServiceError};
