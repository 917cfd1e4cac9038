use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat completion API error: {0}")]
    Api(String),

    #[error("stream error: {0}")]
    Stream(String),

    #[error("stream timed out after {0} seconds of inactivity")]
    StreamTimeout(u64),

    #[error("invalid configuration: {0}")]
    Config(String),
}
