//! Design generation for the Aura inspector.
//!
//! A prompt goes out as a [`GenerateRequest`]; a [`GenerateResponse`] comes
//! back carrying a partial design that the inspector applies field by
//! field. The [`extract`] helpers are shared with the service that talks to
//! the completion model.

pub mod client;
pub mod error;
pub mod extract;
pub mod protocol;

pub use client::{Generation, GenerationClient, GenerationSession};
pub use error::GenerateError;
pub use extract::{ExtractError, extract_design_json, has_recognized_field};
pub use protocol::{GenerateRequest, GenerateResponse, ModelId, TokenUsage, UnknownModel};
