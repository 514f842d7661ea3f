//! # PMOSource
//!
//! Common traits and types for PMOMusic media sources.
//!
//! This crate provides the host-side abstractions every browsable media
//! source plugs into: a tree of [`BrowseMediaSource`] nodes that the UI walks
//! one level at a time, and a [`PlayMedia`] descriptor handed to players once
//! a leaf is picked.
//!
//! ## Features
//!
//! - **Tree Navigation**: Nodes carry a [`MediaClass`], playability and
//!   expandability flags, an optional thumbnail and optional children.
//! - **URI Resolution**: `media-source://<domain>/<identifier>` URIs parsed into
//!   [`MediaSourceItem`].
//! - **Send + Sync**: Sources are held as `Arc<dyn MediaSource>` by async hosts.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pmosource::{MediaSource, MediaSourceItem};
//!
//! let item = MediaSourceItem::from_uri("media-source://jellyfin/")?;
//! let root = source.browse_media(&item, &[]).await?;
//! for child in root.children.unwrap_or_default() {
//!     println!("{} ({})", child.title, child.media_class);
//! }
//! ```

pub mod item;
pub mod media;

use std::fmt::Debug;

pub use item::{MediaSourceItem, URI_SCHEME};
pub use media::{BrowseMediaSource, MediaClass, PlayMedia, MEDIA_TYPE_NONE};

/// Error types for media source operations
#[derive(Debug, thiserror::Error)]
pub enum MediaSourceError {
    #[error("Browse error: {0}")]
    Browse(String),

    #[error("Unresolvable media: {0}")]
    Unresolvable(String),

    #[error("Invalid media source URI: {0}")]
    InvalidUri(String),
}

/// Result type for media source operations
pub type Result<T> = std::result::Result<T, MediaSourceError>;

/// Main trait for browsable media sources
///
/// A source exposes a tree rooted at an item without identifier. Each call to
/// [`browse_media`](MediaSource::browse_media) returns one node and, for
/// expandable nodes, its direct children. Leaves are turned into a playable
/// URL with [`resolve_media`](MediaSource::resolve_media).
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` for use in async servers.
///
/// # Examples
///
/// ```rust,no_run
/// use pmosource::{BrowseMediaSource, MediaClass, MediaSource, MediaSourceItem, PlayMedia, Result};
///
/// #[derive(Debug)]
/// struct Radio;
///
/// #[async_trait::async_trait]
/// impl MediaSource for Radio {
///     fn domain(&self) -> &str {
///         "radio"
///     }
///
///     fn name(&self) -> &str {
///         "Radio"
///     }
///
///     async fn resolve_media(&self, item: &MediaSourceItem) -> Result<PlayMedia> {
///         Ok(PlayMedia::new(
///             format!("http://example.com/{}", item.identifier.as_deref().unwrap_or("live")),
///             "audio/aac",
///         ))
///     }
///
///     async fn browse_media(
///         &self,
///         _item: &MediaSourceItem,
///         _media_types: &[&str],
///     ) -> Result<BrowseMediaSource> {
///         Ok(BrowseMediaSource::new("radio", None, MediaClass::Directory, "Radio").expandable())
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait MediaSource: Debug + Send + Sync {
    /// Returns the domain this source answers for in `media-source://` URIs
    fn domain(&self) -> &str;

    /// Returns the human-readable name of the source, used as the root title
    fn name(&self) -> &str;

    /// Resolve a playable item to a stream URL and its MIME type
    ///
    /// # Errors
    ///
    /// Returns [`MediaSourceError::Unresolvable`] when the item cannot be
    /// played.
    async fn resolve_media(&self, item: &MediaSourceItem) -> Result<PlayMedia>;

    /// Browse an item, or the root of the source when the item has no identifier
    ///
    /// `media_types` is the list of content types the caller is interested
    /// in. Sources serving a single kind of media may ignore it.
    ///
    /// # Errors
    ///
    /// Returns [`MediaSourceError::Browse`] when the item cannot be browsed.
    async fn browse_media(
        &self,
        item: &MediaSourceItem,
        media_types: &[&str],
    ) -> Result<BrowseMediaSource>;

    /// Returns true when `item` addresses this source
    fn handles(&self, item: &MediaSourceItem) -> bool {
        item.domain.as_deref() == Some(self.domain())
    }
}

// Re-export commonly used types
pub use async_trait::async_trait;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct TestSource;

    #[async_trait]
    impl MediaSource for TestSource {
        fn domain(&self) -> &str {
            "test"
        }

        fn name(&self) -> &str {
            "Test Source"
        }

        async fn resolve_media(&self, item: &MediaSourceItem) -> Result<PlayMedia> {
            match item.identifier.as_deref() {
                Some(id) => Ok(PlayMedia::new(format!("http://example.com/{}", id), "audio/flac")),
                None => Err(MediaSourceError::Unresolvable("no identifier".to_string())),
            }
        }

        async fn browse_media(
            &self,
            item: &MediaSourceItem,
            _media_types: &[&str],
        ) -> Result<BrowseMediaSource> {
            if item.identifier.is_some() {
                return Err(MediaSourceError::Browse("leaf".to_string()));
            }
            Ok(
                BrowseMediaSource::new("test", None, MediaClass::Directory, self.name())
                    .expandable()
                    .with_children(MediaClass::Track, vec![]),
            )
        }
    }

    #[tokio::test]
    async fn test_media_source_trait() {
        let source = TestSource;
        assert_eq!(source.name(), "Test Source");
        assert_eq!(source.domain(), "test");
    }

    #[tokio::test]
    async fn test_root_browse() {
        let source = TestSource;
        let root = source
            .browse_media(&MediaSourceItem::root("test"), &[])
            .await
            .unwrap();
        assert!(root.identifier.is_none());
        assert!(root.can_expand);
        assert!(!root.can_play);
        assert_eq!(root.children.as_deref().map(<[_]>::len), Some(0));
    }

    #[tokio::test]
    async fn test_resolve_requires_identifier() {
        let source = TestSource;
        let result = source.resolve_media(&MediaSourceItem::root("test")).await;
        assert!(matches!(result, Err(MediaSourceError::Unresolvable(_))));

        let media = source
            .resolve_media(&MediaSourceItem::new("test", "abc"))
            .await
            .unwrap();
        assert_eq!(media.url, "http://example.com/abc");
    }

    #[test]
    fn test_handles_domain() {
        let source = TestSource;
        assert!(source.handles(&MediaSourceItem::new("test", "1")));
        assert!(!source.handles(&MediaSourceItem::new("other", "1")));
    }
}
