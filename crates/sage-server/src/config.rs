//! Server configuration loading from file and environment variables.

use sage_voice::LiveKitConfig;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// LiveKit credentials for token minting.
    #[serde(default)]
    pub livekit: LiveKitConfig,

    /// Cross-origin settings for the browser client.
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "sage_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// Cross-origin configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to call the token endpoint. Empty means any origin
    /// (development mode).
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    5002
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
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
/// - `SAGE_HOST` overrides `server.host`
/// - `SAGE_PORT` overrides `server.port`
/// - `SAGE_LOG_LEVEL` overrides `logging.level`
/// - `SAGE_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `LIVEKIT_URL` overrides `livekit.url`
/// - `LIVEKIT_PUBLIC_URL` overrides `livekit.public_url`
/// - `LIVEKIT_API_KEY` overrides `livekit.api_key`
/// - `LIVEKIT_API_SECRET` overrides `livekit.api_secret`
/// - `SAGE_ALLOWED_ORIGINS` (JSON array) overrides `cors.allowed_origins`
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    // Environment variable overrides
    if let Ok(host) = std::env::var("SAGE_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Ok(port) = std::env::var("SAGE_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
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
    if let Ok(origins) = std::env::var("SAGE_ALLOWED_ORIGINS") {
        match serde_json::from_str::<Vec<String>>(&origins) {
            Ok(parsed) => config.cors.allowed_origins = parsed,
            Err(e) => {
                tracing::warn!(
                    "SAGE_ALLOWED_ORIGINS is not a JSON array of strings, ignoring: {}",
                    e
                );
            }
        }
    }

    Ok(config)
}
