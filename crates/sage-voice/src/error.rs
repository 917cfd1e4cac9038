use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("LiveKit API error: {0}")]
    LiveKit(#[from] livekit_api::access_token::AccessTokenError),

    #[error("room service error: {0}")]
    RoomService(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("avatar session error: {0}")]
    Avatar(String),

    #[error("session error: {0}")]
    Session(String),
}
