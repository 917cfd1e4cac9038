//! Voice session component descriptors.
//!
//! A Sage agent does not run STT, TTS, or turn detection itself. It joins a
//! platform-managed room and declares which hosted components the session
//! should run. These descriptors are the configuration the worker hands to
//! the platform when the session starts.

use serde::{Deserialize, Serialize};

/// Default avatar resource rendered when no explicit id is configured.
pub const DEFAULT_AVATAR_ID: &str = "694c83e2-8895-4a98-bd16-56332ca3f449";

/// Speech-to-text component configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SttDescriptor {
    /// Hosted STT provider name (e.g. "deepgram").
    pub provider: String,
    /// Provider-specific model identifier.
    pub model: String,
    /// BCP-47 language hint. `None` lets the provider auto-detect.
    #[serde(default)]
    pub language: Option<String>,
}

impl Default for SttDescriptor {
    fn default() -> Self {
        Self {
            provider: "deepgram".to_string(),
            model: "nova-2".to_string(),
            language: None,
        }
    }
}

/// Text-to-speech component configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtsDescriptor {
    /// Hosted TTS provider name (e.g. "deepgram").
    pub provider: String,
    /// Voice identifier within the provider.
    pub voice: String,
}

impl Default for TtsDescriptor {
    fn default() -> Self {
        Self {
            provider: "deepgram".to_string(),
            voice: "aura-asteria-en".to_string(),
        }
    }
}

/// Voice activity detection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VadDescriptor {
    /// Hosted VAD model name (e.g. "silero").
    pub model: String,
}

impl Default for VadDescriptor {
    fn default() -> Self {
        Self {
            model: "silero".to_string(),
        }
    }
}

/// End-of-turn detection strategy run by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnDetectionMode {
    /// Language-agnostic semantic turn detector.
    #[default]
    Multilingual,
    /// English-only turn detector.
    English,
    /// VAD silence threshold only.
    VadOnly,
}

/// Input noise cancellation applied by the platform before STT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseCancellationMode {
    /// Background voice cancellation.
    #[default]
    Bvc,
    /// Stationary noise suppression only.
    Basic,
    /// Pass audio through untouched.
    Off,
}

/// The full component set a session is started with.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionComponents {
    #[serde(default)]
    pub stt: SttDescriptor,
    #[serde(default)]
    pub tts: TtsDescriptor,
    #[serde(default)]
    pub vad: VadDescriptor,
    #[serde(default)]
    pub turn_detection: TurnDetectionMode,
    #[serde(default)]
    pub noise_cancellation: NoiseCancellationMode,
}

/// Avatar rendering configuration.
///
/// The avatar provider joins the room as a second participant and lip-syncs
/// the agent's audio track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarConfig {
    /// Base URL of the avatar provider's REST API.
    pub api_url: String,
    /// Provider API key.
    pub api_key: String,
    /// Avatar resource to render. `None` uses [`DEFAULT_AVATAR_ID`].
    #[serde(default)]
    pub avatar_id: Option<String>,
}

impl AvatarConfig {
    /// Returns the avatar id to render, falling back to the default resource.
    pub fn resolved_avatar_id(&self) -> &str {
        self.avatar_id.as_deref().unwrap_or(DEFAULT_AVATAR_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_components_match_hosted_stack() {
        let components = SessionComponents::default();
        assert_eq!(components.stt.provider, "deepgram");
        assert_eq!(components.tts.provider, "deepgram");
        assert_eq!(components.vad.model, "silero");
        assert_eq!(components.turn_detection, TurnDetectionMode::Multilingual);
        assert_eq!(components.noise_cancellation, NoiseCancellationMode::Bvc);
    }

    #[test]
    fn avatar_id_falls_back_to_default() {
        let config = AvatarConfig {
            api_url: "https://avatars.example.com".to_string(),
            api_key: "key".to_string(),
            avatar_id: None,
        };
        assert_eq!(config.resolved_avatar_id(), DEFAULT_AVATAR_ID);

        let config = AvatarConfig {
            avatar_id: Some("custom".to_string()),
            ..config
        };
        assert_eq!(config.resolved_avatar_id(), "custom");
    }

    #[test]
    fn components_parse_from_partial_toml() {
        let toml_str = r#"
            [stt]
            provider = "deepgram"
            model = "nova-2"
            language = "en"
        "#;
        let components: SessionComponents = toml::from_str(toml_str).unwrap();
        assert_eq!(components.stt.language.as_deref(), Some("en"));
        assert_eq!(components.tts, TtsDescriptor::default());
        assert_eq!(components.turn_detection, TurnDetectionMode::Multilingual);
    }

    #[test]
    fn turn_detection_serializes_snake_case() {
        let json = serde_json::to_value(TurnDetectionMode::VadOnly).unwrap();
        assert_eq!(json, "vad_only");
    }
}
