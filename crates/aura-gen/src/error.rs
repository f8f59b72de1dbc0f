use thiserror::Error;

/// Failure of a generation round-trip. `Display` is the message shown to
/// the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("Prompt cannot be empty")]
    EmptyPrompt,

    /// Non-2xx status whose body carried no error message.
    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },

    /// Error reported by the service itself.
    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Parse(String),

    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for GenerateError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GenerateError::Parse(e.to_string())
        } else {
            GenerateError::Transport(e.to_string())
        }
    }
}
