//! Constants shared by the Jellyfin client and source

/// Domain of the source in `media-source://` URIs
pub const DOMAIN: &str = "jellyfin";

/// Title of the root node
pub const SOURCE_NAME: &str = "Jellyfin";

/// Client name announced to the server
pub const CLIENT_NAME: &str = "PMOMusic";

/// Client version announced to the server
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Bitrate cap passed to the universal audio endpoint
pub const MAX_STREAMING_BITRATE: &str = "140000000";

/// Image kind used for thumbnails
pub const IMAGE_TYPE_PRIMARY: &str = "Primary";

/// Default media type filter requested by hosts
pub const MEDIA_TYPE_AUDIO: &str = "Audio";

/// Extra field requested on track listings so MIME types can be derived
pub const FIELD_MEDIA_SOURCES: &str = "MediaSources";

/// Default HTTP timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
