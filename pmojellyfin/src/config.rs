//! Session and configuration for the Jellyfin source
//!
//! The session holds the values the source embeds in URLs (server URL, access
//! token, user id, device id). It is built once, either directly from an
//! already authenticated client or from a [`JellyfinConfig`] loaded from YAML,
//! and never changes for the lifetime of the source.
//!
//! ```yaml
//! url: http://jellyfin.local:8096
//! token: 0123456789abcdef
//! user_id: 4f8c2d7e
//! device_id: pmomusic-livingroom
//! timeout_secs: 10
//! ```
//!
//! Every key can be overridden with a `PMOJELLYFIN_<KEY>` environment
//! variable (`PMOJELLYFIN_URL`, `PMOJELLYFIN_TOKEN`, ...).

use crate::constants::{CLIENT_NAME, DEFAULT_TIMEOUT_SECS};
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use std::{env, fs};
use tracing::debug;

const ENV_PREFIX: &str = "PMOJELLYFIN_";

/// Authenticated session values used to build URLs and request headers
#[derive(Clone, PartialEq, Eq)]
pub struct JellyfinSession {
    base_url: String,
    access_token: String,
    user_id: String,
    device_id: String,
}

impl JellyfinSession {
    pub fn new(
        server_url: impl AsRef<str>,
        access_token: impl Into<String>,
        user_id: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            base_url: normalize_base_url(server_url.as_ref()),
            access_token: access_token.into(),
            user_id: user_id.into(),
            device_id: device_id.into(),
        }
    }

    /// Server URL, always ending with `/`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Access token, also used as `api_key` in URLs
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }
}

impl std::fmt::Debug for JellyfinSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JellyfinSession")
            .field("base_url", &self.base_url)
            .field("user_id", &self.user_id)
            .field("device_id", &self.device_id)
            .finish_non_exhaustive()
    }
}

fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim().trim_end_matches('/'))
}

/// On-disk configuration of the Jellyfin source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JellyfinConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl JellyfinConfig {
    /// Parses a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Invalid Jellyfin configuration")
    }

    /// Loads a YAML file and applies environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::from_file(path.as_ref())?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading Jellyfin configuration from {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Builds a configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Replaces values with `PMOJELLYFIN_*` environment variables when set
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(format!("{}{}", ENV_PREFIX, key)).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let fields: [(&str, &mut Option<String>); 5] = [
            ("URL", &mut self.url),
            ("TOKEN", &mut self.token),
            ("USER_ID", &mut self.user_id),
            ("DEVICE_ID", &mut self.device_id),
            ("CLIENT_NAME", &mut self.client_name),
        ];
        for (key, field) in fields {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                debug!("Jellyfin configuration: {}{} overrides file value", ENV_PREFIX, key);
                *field = Some(value);
            }
        }
        if let Some(timeout) = lookup("TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.timeout_secs = Some(timeout);
        }
    }

    /// Builds the session, generating a device id when none is configured
    pub fn session(&self) -> Result<JellyfinSession> {
        let url = required(&self.url, "url")?;
        let token = required(&self.token, "token")?;
        let user_id = required(&self.user_id, "user_id")?;
        let device_id = match self.device_id.as_deref().filter(|d| !d.is_empty()) {
            Some(id) => id.to_string(),
            None => uuid::Uuid::new_v4().to_string(),
        };

        Ok(JellyfinSession::new(url, token, user_id, device_id))
    }

    /// Client name announced in the authorization header
    pub fn client_name(&self) -> &str {
        self.client_name.as_deref().unwrap_or(CLIENT_NAME)
    }

    /// HTTP timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

fn required<'a>(value: &'a Option<String>, key: &str) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| anyhow!("Jellyfin {} not configured", key))
}
