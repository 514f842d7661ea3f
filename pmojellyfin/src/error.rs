//! Error handling for the Jellyfin source

use thiserror::Error;

/// Result type for pmojellyfin
pub type Result<T> = std::result::Result<T, JellyfinError>;

/// Errors raised while browsing or resolving Jellyfin items
#[derive(Error, Debug)]
pub enum JellyfinError {
    /// Browse requested on an item that is not a library, artist or album
    #[error("Unsupported item type {0}")]
    UnsupportedItemType(String),

    /// Library whose collection type has no builder
    #[error("Unsupported collection type {0}")]
    UnsupportedCollectionType(String),

    /// Resolve requested on an item that is not audio
    #[error("Unsupported media type {0}")]
    UnsupportedMediaType(String),

    /// No MIME type could be derived from the item's media sources
    #[error("Unable to determine mime type for path {0}")]
    MimeTypeUndetermined(String),

    /// Empty or malformed item identifier
    #[error("Invalid item identifier: {0:?}")]
    InvalidIdentifier(String),

    /// Item unknown to the server
    #[error("Item not found: {0}")]
    NotFound(String),

    /// Token rejected by the server
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Other non-success HTTP status
    #[error("Jellyfin API error (code {code}): {message}")]
    Api { code: u16, message: String },

    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response body is not the expected JSON
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// The blocking task running an API call panicked or was cancelled
    #[error("Blocking task failed: {0}")]
    Executor(#[from] tokio::task::JoinError),
}

impl JellyfinError {
    /// Builds an error from a non-success HTTP status code
    pub fn from_status_code(code: u16, message: impl Into<String>) -> Self {
        match code {
            401 | 403 => Self::Unauthorized(message.into()),
            404 => Self::NotFound(message.into()),
            _ => Self::Api {
                code,
                message: message.into(),
            },
        }
    }

    /// True for the errors describing an item that cannot be browsed or played,
    /// as opposed to transport or configuration failures
    pub fn is_browse_error(&self) -> bool {
        matches!(
            self,
            JellyfinError::UnsupportedItemType(_)
                | JellyfinError::UnsupportedCollectionType(_)
                | JellyfinError::UnsupportedMediaType(_)
                | JellyfinError::MimeTypeUndetermined(_)
        )
    }
}

impl From<ureq::Error> for JellyfinError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => Self::from_status_code(code, format!("HTTP {}", code)),
            other => Self::Http(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_code() {
        assert!(matches!(
            JellyfinError::from_status_code(401, "nope"),
            JellyfinError::Unauthorized(_)
        ));
        assert!(matches!(
            JellyfinError::from_status_code(404, "gone"),
            JellyfinError::NotFound(_)
        ));
        assert!(matches!(
            JellyfinError::from_status_code(500, "boom"),
            JellyfinError::Api { code: 500, .. }
        ));
    }

    #[test]
    fn test_messages_carry_offending_value() {
        let err = JellyfinError::UnsupportedCollectionType("movies".to_string());
        assert_eq!(err.to_string(), "Unsupported collection type movies");
        assert!(err.is_browse_error());

        let err = JellyfinError::NotFound("abc".to_string());
        assert!(!err.is_browse_error());
    }
}
