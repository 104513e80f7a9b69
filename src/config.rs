use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{IdeaForgeError, Result};

pub const DEFAULT_MODEL: &str = "google/gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://ai.gateway.lovable.dev/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8787;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl GatewayConfig {
    pub fn model(&self) -> String {
        self.model
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1))
    }

    pub fn require_api_key(&self) -> Result<String> {
        self.api_key
            .clone()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                IdeaForgeError::Config("AI gateway API key is not configured".to_string())
            })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct AuthConfig {
    /// Shared bearer token. When unset only presence and shape are checked.
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Config {
    pub fn convention_defaults() -> Self {
        Self {
            gateway: GatewayConfig {
                api_key: None,
                model: Some(DEFAULT_MODEL.to_string()),
                base_url: Some(DEFAULT_BASE_URL.to_string()),
                timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            },
            server: ServerConfig {
                host: Some(DEFAULT_HOST.to_string()),
                port: Some(DEFAULT_PORT),
            },
            auth: AuthConfig::default(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            IdeaForgeError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|e| IdeaForgeError::Config(e.to_string()))
    }

    /// Loads the optional config file, falling back to defaults, then applies
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::convention_defaults(),
        };
        Ok(base.apply_env(|key| std::env::var(key).ok()))
    }

    pub fn apply_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = non_empty("IDEA_FORGE_API_KEY").or_else(|| non_empty("AI_GATEWAY_API_KEY"))
        {
            self.gateway.api_key = Some(key);
        }
        if let Some(model) = non_empty("IDEA_FORGE_MODEL") {
            self.gateway.model = Some(model);
        }
        if let Some(url) = non_empty("IDEA_FORGE_BASE_URL") {
            self.gateway.base_url = Some(url);
        }
        if let Some(token) = non_empty("IDEA_FORGE_AUTH_TOKEN") {
            self.auth.token = Some(token);
        }
        self
    }

    pub fn host(&self) -> String {
        self.server
            .host
            .clone()
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub fn port(&self) -> u16 {
        self.server.port.unwrap_or(DEFAULT_PORT)
    }
}
