//! Avatar renderer bootstrap.
//!
//! The avatar provider joins the room as its own participant: it receives the
//! agent's audio track and publishes a lip-synced video track. Starting a
//! session is one REST call; everything after that happens inside the
//! provider's infrastructure.

use crate::error::VoiceError;
use sage_types::AvatarConfig;
use tracing::info;

/// Client for the hosted avatar provider's session API.
#[derive(Debug, Clone)]
pub struct AvatarSession {
    config: AvatarConfig,
    http: reqwest::Client,
}

impl AvatarSession {
    pub fn new(config: AvatarConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// The avatar resource this session will render.
    pub fn avatar_id(&self) -> &str {
        self.config.resolved_avatar_id()
    }

    /// Starts rendering into the given room.
    ///
    /// `session_token` is a join token minted for the avatar participant;
    /// `livekit_url` tells the provider where the room lives. Returns the
    /// provider's session id.
    pub async fn start(
        &self,
        livekit_url: &str,
        session_token: &str,
        room_name: &str,
    ) -> Result<String, VoiceError> {
        if self.config.api_url.is_empty() {
            return Err(VoiceError::Config(
                "avatar.api_url is not set".to_string(),
            ));
        }

        let url = format!("{}/v1/session", self.config.api_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "avatar_id": self.avatar_id(),
            "livekit_url": livekit_url,
            "livekit_token": session_token,
            "room": room_name,
        });

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| VoiceError::Avatar(format!("avatar session request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(VoiceError::Avatar(format!(
                "avatar provider returned {status}: {detail}"
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| VoiceError::Avatar(format!("unparseable avatar session response: {e}")))?;

        let session_id = payload
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        info!(
            avatar_id = self.avatar_id(),
            room = room_name,
            session_id = %session_id,
            "avatar session started"
        );

        Ok(session_id)
    }
}
