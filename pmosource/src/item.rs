//! Media source item addressing

use crate::{MediaSourceError, Result};
use std::fmt;

/// URI scheme of media source items
pub const URI_SCHEME: &str = "media-source://";

/// An item of a media source, as requested by the host
///
/// Items are addressed by `media-source://<domain>/<identifier>`. An item
/// without identifier designates the root of the source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaSourceItem {
    pub domain: Option<String>,
    pub identifier: Option<String>,
}

impl MediaSourceItem {
    pub fn new(domain: impl Into<String>, identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        Self {
            domain: Some(domain.into()),
            identifier: (!identifier.is_empty()).then_some(identifier),
        }
    }

    /// Item designating the root of a source
    pub fn root(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            identifier: None,
        }
    }

    /// Parses a `media-source://` URI
    ///
    /// `media-source://` alone addresses the list of sources (no domain),
    /// `media-source://jellyfin` and `media-source://jellyfin/` the root of a
    /// source.
    pub fn from_uri(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix(URI_SCHEME)
            .ok_or_else(|| MediaSourceError::InvalidUri(uri.to_string()))?;

        let (domain, identifier) = match rest.split_once('/') {
            Some((domain, identifier)) => (domain, identifier),
            None => (rest, ""),
        };

        Ok(Self {
            domain: (!domain.is_empty()).then(|| domain.to_string()),
            identifier: (!identifier.is_empty()).then(|| identifier.to_string()),
        })
    }
}

impl fmt::Display for MediaSourceItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}/{}",
            URI_SCHEME,
            self.domain.as_deref().unwrap_or_default(),
            self.identifier.as_deref().unwrap_or_default()
        )
    }
}
