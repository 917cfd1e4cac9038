use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("voice error: {0}")]
    Voice(#[from] sage_voice::VoiceError),

    #[error("llm error: {0}")]
    Llm(#[from] sage_llm::LlmError),

    #[error("invalid configuration: {0}")]
    Config(String),
}
