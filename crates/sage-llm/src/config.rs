use serde::{Deserialize, Serialize};
use std::fmt;

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    800
}

fn default_stream_idle_timeout_seconds() -> u64 {
    120
}

/// Configuration for the chat-completion API client.
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// API key sent as a bearer token. Usually supplied via `OPENAI_API_KEY`
    /// rather than the config file.
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Upper bound on generated tokens per reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Seconds of stream inactivity before the reply is abandoned.
    #[serde(default = "default_stream_idle_timeout_seconds")]
    pub stream_idle_timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key: String::new(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            stream_idle_timeout_seconds: default_stream_idle_timeout_seconds(),
        }
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_base", &self.api_base)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field(
                "stream_idle_timeout_seconds",
                &self.stream_idle_timeout_seconds,
            )
            .finish()
    }
}
