//! Pulling a design object out of a free-form model reply.
//!
//! Models are told to answer with bare JSON but often wrap it in a fenced
//! code block or surround it with prose. The first strategy that yields
//! valid JSON wins:
//!
//! 1. the whole reply,
//! 2. the body of the first fenced block (```` ```json ```` or bare ```` ``` ````),
//! 3. the span from the first `{` to the last `}`.

use serde_json::Value;
use thiserror::Error;
use winnow::ascii::multispace0;
use winnow::combinator::{delimited, opt};
use winnow::prelude::*;
use winnow::token::take_until;

const FENCE: &str = "```";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// A brace-delimited span was found but did not parse.
    #[error("Failed to parse AI response as JSON")]
    Malformed,
    #[error("No valid JSON found in AI response")]
    NotFound,
}

pub fn extract_design_json(reply: &str) -> Result<Value, ExtractError> {
    if let Ok(value) = serde_json::from_str(reply) {
        return Ok(value);
    }

    if let Some(body) = fenced_block(reply) {
        if let Ok(value) = serde_json::from_str(body) {
            return Ok(value);
        }
    }

    match brace_span(reply) {
        Some(span) => serde_json::from_str(span).map_err(|_| ExtractError::Malformed),
        None => Err(ExtractError::NotFound),
    }
}

/// Body of the first complete fenced block, after an optional `json`
/// language tag and leading whitespace.
fn fenced_block(reply: &str) -> Option<&str> {
    let mut input = reply;
    parse_fenced(&mut input).ok()
}

fn parse_fenced<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    delimited(
        (take_until(0.., FENCE), FENCE, opt("json"), multispace0),
        take_until(0.., FENCE),
        FENCE,
    )
    .parse_next(input)
}

fn brace_span(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (end > start).then(|| &reply[start..=end])
}

/// Whether `value` looks like a design: an object with at least one
/// truthy recognized field, or a numeric effect value.
pub fn has_recognized_field(value: &Value) -> bool {
    const FIELDS: [&str; 10] = [
        "elementTag",
        "textContent",
        "size",
        "padding",
        "margin",
        "typography",
        "background",
        "border",
        "transforms",
        "transforms3d",
    ];
    const NUMERIC: [&str; 3] = ["opacity", "blur", "backdropBlur"];

    let Some(obj) = value.as_object() else {
        return false;
    };
    FIELDS.iter().any(|k| obj.get(*k).is_some_and(truthy))
        || NUMERIC.iter().any(|k| obj.get(*k).is_some_and(Value::is_number))
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
