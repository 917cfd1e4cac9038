//! Worker configuration loading from file and environment variables.

use sage_llm::LlmConfig;
use sage_types::{AvatarConfig, SessionComponents};
use sage_voice::LiveKitConfig;
use serde::Deserialize;
use thiserror::Error;

/// Top-level worker configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkerConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// LiveKit credentials and URLs.
    #[serde(default)]
    pub livekit: LiveKitConfig,

    /// Chat-completion API settings.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Avatar provider settings. Absent means no avatar is rendered.
    #[serde(default)]
    pub avatar: Option<AvatarConfig>,

    /// Agent identity and session settings.
    #[serde(default)]
    pub agent: AgentConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "sage_worker=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// Agent identity and session settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Identity the agent joins the room with.
    #[serde(default = "default_agent_identity")]
    pub identity: String,

    /// Room the agent serves.
    #[serde(default = "default_room")]
    pub room: String,

    /// Platform components the session is started with.
    #[serde(default)]
    pub components: SessionComponents,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_agent_identity() -> String {
    "sage-tutor".to_string()
}

fn default_room() -> String {
    "lesson-room".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            identity: default_agent_identity(),
            room: default_room(),
            components: SessionComponents::default(),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `SAGE_LOG_LEVEL` overrides `logging.level`
/// - `SAGE_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `LIVEKIT_URL` overrides `livekit.url`
/// - `LIVEKIT_PUBLIC_URL` overrides `livekit.public_url`
/// - `LIVEKIT_API_KEY` overrides `livekit.api_key`
/// - `LIVEKIT_API_SECRET` overrides `livekit.api_secret`
/// - `OPENAI_API_KEY` overrides `llm.api_key`
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<WorkerConfig, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                WorkerConfig::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => WorkerConfig::default(),
    };

    // Environment variable overrides
    if let Ok(level) = std::env::var("SAGE_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("SAGE_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Ok(url) = std::env::var("LIVEKIT_URL") {
        config.livekit.url = url;
    }
    if let Ok(url) = std::env::var("LIVEKIT_PUBLIC_URL") {
        config.livekit.public_url = url;
    }
    if let Ok(key) = std::env::var("LIVEKIT_API_KEY") {
        config.livekit.api_key = key;
    }
    if let Ok(secret) = std::env::var("LIVEKIT_API_SECRET") {
        config.livekit.api_secret = secret;
    }
    if let Ok(key) = std::env::var("OPENAI_API_KEY") {
        config.llm.api_key = key;
    }

    Ok(config)
}
