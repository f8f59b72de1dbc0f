use clap::Parser;

pub const DEFAULT_UPSTREAM: &str = "https://api.openai.com/v1";

/// Command-line configuration of the generation service.
#[derive(Debug, Clone, Parser)]
#[command(name = "aura-server")]
#[command(about = "Aura Inspector design-generation service")]
#[command(version)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    pub bind: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8787)]
    pub port: u16,

    /// Base URL of the chat-completion API
    #[arg(long, default_value = DEFAULT_UPSTREAM)]
    pub upstream: String,

    /// API key for the completion service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    /// The configured key, if it is non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}
