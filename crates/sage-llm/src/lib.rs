//! Language-model integration for the Sage tutor.
//!
//! Holds the bounded conversation window, the fixed Socratic system prompt,
//! and a streaming client for an OpenAI-compatible chat-completion API. The
//! [`TutorAgent`] ties them together: it composes the prompt from the recent
//! history, streams the reply token by token, and records the exchange once
//! the stream completes.

pub mod agent;
pub mod client;
pub mod config;
pub mod error;
pub mod history;
pub mod prompt;

pub use agent::TutorAgent;
pub use client::ChatClient;
pub use config::LlmConfig;
pub use error::LlmError;
pub use history::ChatHistory;
