//! Shared types for the Sage voice-tutor platform.
//!
//! This crate provides the type definitions used across all Sage crates:
//! chat roles and messages exchanged with the language model, and the
//! descriptors that configure a platform voice session (STT, TTS, VAD,
//! turn detection, avatar rendering).
//!
//! No crate in the workspace depends on anything *except* `sage-types` for
//! cross-cutting type definitions. This keeps the dependency graph clean and
//! prevents circular dependencies.

pub mod chat;
pub mod session;

pub use chat::{ChatMessage, ChatRole};
pub use session::{
    AvatarConfig, NoiseCancellationMode, SessionComponents, SttDescriptor, TtsDescriptor,
    TurnDetectionMode, VadDescriptor,
};
