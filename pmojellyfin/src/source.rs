//! Media source implementation for Jellyfin
//!
//! This module implements the [`pmosource::MediaSource`] trait for a Jellyfin
//! server, exposing its music libraries as a tree:
//!
//! ```text
//! Jellyfin (root)
//! └── library (CollectionFolder, music)
//!     └── artist (MusicArtist)
//!         └── album (MusicAlbum)
//!             └── track (Audio, playable)
//! ```
//!
//! Each browse call returns one node with its direct children. Every API call
//! runs on tokio's blocking pool, one after the other.

use crate::api::{HttpJellyfinApi, JellyfinApi};
use crate::config::{JellyfinConfig, JellyfinSession};
use crate::constants::{DOMAIN, FIELD_MEDIA_SOURCES, MEDIA_TYPE_AUDIO, SOURCE_NAME};
use crate::error::{JellyfinError, Result};
use crate::models::{
    CollectionType, ItemType, MediaType, RemoteItem, SUPPORTED_COLLECTION_TYPES, UserItemsQuery,
};
use crate::urls::{audio_stream_url, thumbnail_url};
use pmosource::{
    BrowseMediaSource, MediaClass, MediaSource, MediaSourceError, MediaSourceItem, PlayMedia,
    async_trait,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Jellyfin media source
///
/// Holds a read-only API handle and the session values embedded in URLs.
/// Nothing is cached: every call fetches fresh items and builds a new tree.
///
/// # Examples
///
/// ```no_run
/// use pmojellyfin::{JellyfinConfig, JellyfinSource};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = JellyfinConfig::load("jellyfin.yaml")?;
///     let source = JellyfinSource::from_config(&config)?;
///
///     let root = source.browse(None, &["Audio"]).await?;
///     for library in root.children() {
///         println!("{}", library.title);
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct JellyfinSource {
    api: Arc<dyn JellyfinApi>,
    session: JellyfinSession,
}

impl std::fmt::Debug for JellyfinSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JellyfinSource")
            .field("session", &self.session)
            .finish()
    }
}

impl JellyfinSource {
    /// Creates a source over an authenticated API handle
    pub fn new(api: Arc<dyn JellyfinApi>, session: JellyfinSession) -> Self {
        info!(
            "Jellyfin source for {} (user {})",
            session.base_url(),
            session.user_id()
        );
        Self { api, session }
    }

    /// Creates a source backed by [`HttpJellyfinApi`]
    pub fn from_config(config: &JellyfinConfig) -> Result<Self> {
        let api = HttpJellyfinApi::from_config(config)?;
        let session = api.session().clone();
        Ok(Self::new(Arc::new(api), session))
    }

    pub fn session(&self) -> &JellyfinSession {
        &self.session
    }

    /// Returns a streamable URL and the associated MIME type
    pub async fn resolve(&self, identifier: &str) -> Result<PlayMedia> {
        if identifier.is_empty() {
            return Err(JellyfinError::InvalidIdentifier(identifier.to_string()));
        }

        let item = self.fetch_item(identifier).await?;
        let url = self.stream_url(&item)?;
        let mime_type = media_mime_type(&item)?;

        debug!("Resolved {} to {} ({})", identifier, url, mime_type);
        Ok(PlayMedia::new(url, mime_type))
    }

    /// Returns a browsable node, the root listing when `identifier` is `None`
    ///
    /// Libraries, artists and albums come back with their direct children.
    /// Only music is served whatever `media_types` holds: an empty slice
    /// means no preference, and a list without `"Audio"` is only logged.
    pub async fn browse(
        &self,
        identifier: Option<&str>,
        media_types: &[&str],
    ) -> Result<BrowseMediaSource> {
        debug!("Browse {:?}", identifier);
        if !media_types.is_empty() && !media_types.contains(&MEDIA_TYPE_AUDIO) {
            debug!("Media types {:?} exclude audio, serving music anyway", media_types);
        }

        let Some(identifier) = identifier.filter(|id| !id.is_empty()) else {
            return self.build_libraries().await;
        };

        let item = self.fetch_item(identifier).await?;
        match &item.item_type {
            ItemType::Library => self.build_library(&item, true).await,
            ItemType::Artist => self.build_artist(&item, true).await,
            ItemType::Album => self.build_album(&item, true).await,
            other => Err(JellyfinError::UnsupportedItemType(other.to_string())),
        }
    }

    // ============ Blocking calls ============

    /// Runs an API call on the blocking pool
    async fn call<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&dyn JellyfinApi) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let api = Arc::clone(&self.api);
        tokio::task::spawn_blocking(move || f(api.as_ref())).await?
    }

    async fn fetch_item(&self, identifier: &str) -> Result<RemoteItem> {
        let id = identifier.to_string();
        self.call(move |api| api.get_item(&id)).await
    }

    /// Libraries the user can see and the source knows how to build
    async fn get_libraries(&self) -> Result<Vec<RemoteItem>> {
        let response = self.call(|api| api.get_media_folders()).await?;

        Ok(response
            .items
            .into_iter()
            .filter(|library| match &library.collection_type {
                Some(ct) if SUPPORTED_COLLECTION_TYPES.contains(ct) && has_builder(ct) => true,
                other => {
                    debug!("Skipping library {} ({:?})", library.name, other);
                    false
                }
            })
            .collect())
    }

    /// Children of `parent_id` whose type is `item_type`
    async fn get_children(&self, parent_id: &str, item_type: ItemType) -> Result<Vec<RemoteItem>> {
        let mut query = UserItemsQuery::children_of(parent_id, item_type.clone());
        if item_type == ItemType::Audio {
            query = query.with_field(FIELD_MEDIA_SOURCES);
        }

        let response = self.call(move |api| api.user_items(&query)).await?;
        debug!(
            "{} {} children under {}",
            response.items.len(),
            item_type,
            parent_id
        );
        Ok(response.items)
    }

    // ============ Builders ============

    async fn build_libraries(&self) -> Result<BrowseMediaSource> {
        let libraries = self.get_libraries().await?;

        let mut children = Vec::with_capacity(libraries.len());
        for library in &libraries {
            children.push(self.build_library(library, false).await?);
        }

        Ok(
            BrowseMediaSource::new(DOMAIN, None, MediaClass::Directory, SOURCE_NAME)
                .expandable()
                .with_children(MediaClass::Directory, children),
        )
    }

    async fn build_library(
        &self,
        library: &RemoteItem,
        include_children: bool,
    ) -> Result<BrowseMediaSource> {
        match &library.collection_type {
            Some(CollectionType::Music) => {
                self.build_music_library(library, include_children).await
            }
            Some(other) => Err(JellyfinError::UnsupportedCollectionType(other.to_string())),
            None => Err(JellyfinError::UnsupportedCollectionType(
                "(none)".to_string(),
            )),
        }
    }

    async fn build_music_library(
        &self,
        library: &RemoteItem,
        include_children: bool,
    ) -> Result<BrowseMediaSource> {
        let node = BrowseMediaSource::new(
            DOMAIN,
            Some(library.id.clone()),
            MediaClass::Directory,
            library.name.as_str(),
        )
        .expandable();

        if !include_children {
            return Ok(node);
        }

        let mut artists = self.get_children(&library.id, ItemType::Artist).await?;
        artists.sort_by(|a, b| a.name.cmp(&b.name));

        let mut children = Vec::with_capacity(artists.len());
        for artist in &artists {
            children.push(self.build_artist(artist, false).await?);
        }
        Ok(node.with_children(MediaClass::Artist, children))
    }

    async fn build_artist(
        &self,
        artist: &RemoteItem,
        include_children: bool,
    ) -> Result<BrowseMediaSource> {
        let node = BrowseMediaSource::new(
            DOMAIN,
            Some(artist.id.clone()),
            MediaClass::Artist,
            artist.name.as_str(),
        )
        .expandable()
        .with_thumbnail(thumbnail_url(&self.session, artist));

        if !include_children {
            return Ok(node);
        }

        let mut albums = self.get_children(&artist.id, ItemType::Album).await?;
        albums.sort_by(|a, b| a.name.cmp(&b.name));

        let mut children = Vec::with_capacity(albums.len());
        for album in &albums {
            children.push(self.build_album(album, false).await?);
        }
        Ok(node.with_children(MediaClass::Album, children))
    }

    async fn build_album(
        &self,
        album: &RemoteItem,
        include_children: bool,
    ) -> Result<BrowseMediaSource> {
        let node = BrowseMediaSource::new(
            DOMAIN,
            Some(album.id.clone()),
            MediaClass::Album,
            album.name.as_str(),
        )
        .expandable()
        .with_thumbnail(thumbnail_url(&self.session, album));

        if !include_children {
            return Ok(node);
        }

        let mut tracks = self.get_children(&album.id, ItemType::Audio).await?;
        // Tracks without index number go last
        tracks.sort_by_key(|t| (t.index_number.is_none(), t.index_number));

        let children = tracks
            .iter()
            .map(|track| self.build_track(track))
            .collect::<Result<Vec<_>>>()?;
        Ok(node.with_children(MediaClass::Track, children))
    }

    fn build_track(&self, track: &RemoteItem) -> Result<BrowseMediaSource> {
        let mime_type = media_mime_type(track)?;

        Ok(BrowseMediaSource::new(
            DOMAIN,
            Some(track.id.clone()),
            MediaClass::Track,
            track.name.as_str(),
        )
        .playable(mime_type)
        .with_thumbnail(thumbnail_url(&self.session, track)))
    }

    // ============ URLs ============

    fn stream_url(&self, item: &RemoteItem) -> Result<String> {
        match &item.media_type {
            Some(MediaType::Audio) => Ok(audio_stream_url(&self.session, &item.id)),
            Some(other) => Err(JellyfinError::UnsupportedMediaType(other.to_string())),
            None => Err(JellyfinError::UnsupportedMediaType("(none)".to_string())),
        }
    }
}

/// Only music libraries have a builder
fn has_builder(collection_type: &CollectionType) -> bool {
    *collection_type == CollectionType::Music
}

/// MIME type guessed from the path of the item's first media source
fn media_mime_type(item: &RemoteItem) -> Result<String> {
    let path = item.primary_path().ok_or_else(|| {
        JellyfinError::MimeTypeUndetermined(format!("(no media source path on item {})", item.id))
    })?;

    mime_guess::from_path(path)
        .first_raw()
        .map(str::to_string)
        .ok_or_else(|| JellyfinError::MimeTypeUndetermined(path.to_string()))
}

fn log_failure(err: &JellyfinError) {
    if err.is_browse_error() {
        debug!("{}", err);
    } else {
        warn!("Jellyfin request failed: {}", err);
    }
}

#[async_trait]
impl MediaSource for JellyfinSource {
    fn domain(&self) -> &str {
        DOMAIN
    }

    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn resolve_media(&self, item: &MediaSourceItem) -> pmosource::Result<PlayMedia> {
        let identifier = item
            .identifier
            .as_deref()
            .ok_or_else(|| MediaSourceError::Unresolvable(item.to_string()))?;

        self.resolve(identifier).await.map_err(|e| {
            log_failure(&e);
            MediaSourceError::Unresolvable(e.to_string())
        })
    }

    async fn browse_media(
        &self,
        item: &MediaSourceItem,
        media_types: &[&str],
    ) -> pmosource::Result<BrowseMediaSource> {
        self.browse(item.identifier.as_deref(), media_types)
            .await
            .map_err(|e| {
                log_failure(&e);
                MediaSourceError::Browse(e.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaSource as RemoteMediaSource;

    fn track(id: &str, path: Option<&str>) -> RemoteItem {
        RemoteItem {
            id: id.to_string(),
            item_type: ItemType::Audio,
            media_type: Some(MediaType::Audio),
            media_sources: path
                .map(|p| {
                    vec![RemoteMediaSource {
                        path: Some(p.to_string()),
                        ..Default::default()
                    }]
                })
                .unwrap_or_default(),
            ..Default::default()
        }
    }

    #[test]
    fn test_mime_type_from_path() {
        let item = track("t1", Some("/music/a/01 - Intro.mp3"));
        assert_eq!(media_mime_type(&item).unwrap(), "audio/mpeg");
    }

    #[test]
    fn test_mime_type_without_media_sources() {
        let item = track("t1", None);
        assert!(matches!(
            media_mime_type(&item),
            Err(JellyfinError::MimeTypeUndetermined(_))
        ));
    }

    #[test]
    fn test_mime_type_unknown_extension() {
        let item = track("t1", Some("/music/a/track.zzqx"));
        match media_mime_type(&item) {
            Err(JellyfinError::MimeTypeUndetermined(path)) => {
                assert_eq!(path, "/music/a/track.zzqx")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_only_music_has_builder() {
        assert!(has_builder(&CollectionType::Music));
        assert!(!has_builder(&CollectionType::Movies));
        assert!(!has_builder(&CollectionType::TvShows));
    }
}
