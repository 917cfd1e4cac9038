//! Voice infrastructure for the Sage tutor.
//!
//! Integrates with LiveKit for WebRTC voice transport: mints room-access
//! tokens, talks to the room service, and manages the agent's room session.
//! The avatar module boots the hosted avatar renderer that lip-syncs the
//! agent's audio track.
//!
//! The architecture separates concerns: learners speak via WebRTC, the
//! platform transcribes their speech back to text for the agent, and the
//! agent sends text intents that the platform's TTS renders to audio.

pub mod avatar;
pub mod config;
pub mod error;
pub mod session;
pub mod token;

pub use avatar::AvatarSession;
pub use config::LiveKitConfig;
pub use error::VoiceError;
pub use session::{AgentSession, TranscriptEvent};
pub use token::TokenService;
