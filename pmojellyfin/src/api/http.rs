//! `ureq` implementation of [`JellyfinApi`]

use super::JellyfinApi;
use crate::config::{JellyfinConfig, JellyfinSession};
use crate::constants::{CLIENT_NAME, CLIENT_VERSION, DEFAULT_TIMEOUT_SECS};
use crate::error::{JellyfinError, Result};
use crate::models::{ItemsResponse, RemoteItem, UserItemsQuery};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use ureq::Agent;

/// Header carrying client identification and the access token
const AUTHORIZATION_HEADER: &str = "X-Emby-Authorization";

/// Body size cap for unpaginated listings (ureq defaults to 10 MiB)
const MAX_RESPONSE_BYTES: u64 = 1 << 30;

/// Blocking HTTP client for an authenticated Jellyfin session
pub struct HttpJellyfinApi {
    agent: Agent,
    session: JellyfinSession,
    authorization: String,
}

impl HttpJellyfinApi {
    /// Creates a client with the default client name and timeout
    pub fn new(session: JellyfinSession) -> Self {
        Self::with_options(session, CLIENT_NAME, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a client from a loaded configuration
    pub fn from_config(config: &JellyfinConfig) -> Result<Self> {
        let session = config.session()?;
        Ok(Self::with_options(session, config.client_name(), config.timeout()))
    }

    pub fn with_options(session: JellyfinSession, client_name: &str, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        let authorization = format!(
            "MediaBrowser Client=\"{}\", Device=\"{}\", DeviceId=\"{}\", Version=\"{}\", Token=\"{}\"",
            client_name,
            CLIENT_NAME,
            session.device_id(),
            CLIENT_VERSION,
            session.access_token()
        );

        Self {
            agent,
            session,
            authorization,
        }
    }

    /// Session the client was built with
    pub fn session(&self) -> &JellyfinSession {
        &self.session
    }

    /// URL of a handler below `Users/{userId}/`
    fn users_url(&self, handler: &str) -> String {
        format!(
            "{}Users/{}/{}",
            self.session.base_url(),
            self.session.user_id(),
            handler
        )
    }

    fn get<T: DeserializeOwned>(&self, url: &str, params: &[(&str, String)]) -> Result<T> {
        debug!("GET {} with {} params", url, params.len());

        let mut response = self
            .agent
            .get(url)
            .header(AUTHORIZATION_HEADER, self.authorization.as_str())
            .header("Accept", "application/json")
            .query_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
            .call()?;

        let status = response.status();
        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_RESPONSE_BYTES)
            .read_to_string()?;

        if !status.is_success() {
            warn!("Jellyfin API error ({}): {}", status.as_u16(), body);
            return Err(JellyfinError::from_status_code(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to parse Jellyfin response: {}", e);
            JellyfinError::JsonParse(e)
        })
    }
}

impl JellyfinApi for HttpJellyfinApi {
    fn get_item(&self, item_id: &str) -> Result<RemoteItem> {
        let handler = format!("Items/{}", urlencoding::encode(item_id));
        self.get(&self.users_url(&handler), &[])
    }

    fn get_media_folders(&self) -> Result<ItemsResponse> {
        self.get(&self.users_url("Items"), &[])
    }

    fn user_items(&self, query: &UserItemsQuery) -> Result<ItemsResponse> {
        self.get(&self.users_url("Items"), &query.to_params())
    }
}

impl std::fmt::Debug for HttpJellyfinApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpJellyfinApi")
            .field("session", &self.session)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_users_url() {
        let api = HttpJellyfinApi::new(JellyfinSession::new("http://host:8096", "t", "u1", "d1"));
        assert_eq!(api.users_url("Items/abc"), "http://host:8096/Users/u1/Items/abc");
    }

    #[test]
    fn test_authorization_header_carries_token_and_device() {
        let api = HttpJellyfinApi::with_options(
            JellyfinSession::new("http://host", "tok", "u", "dev"),
            "Living Room",
            Duration::from_secs(1),
        );
        assert!(api.authorization.starts_with("MediaBrowser Client=\"Living Room\""));
        assert!(api.authorization.contains("DeviceId=\"dev\""));
        assert!(api.authorization.contains("Token=\"tok\""));
    }
}
