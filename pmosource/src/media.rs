//! Browse tree nodes and playback descriptors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Content type used by nodes that are not themselves media (containers)
pub const MEDIA_TYPE_NONE: &str = "";

/// Classification of a node in the browse tree
///
/// Hosts use it to pick icons and to group children in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaClass {
    Directory,
    Artist,
    Album,
    Track,
}

impl MediaClass {
    /// Returns the wire name of the class
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaClass::Directory => "directory",
            MediaClass::Artist => "artist",
            MediaClass::Album => "album",
            MediaClass::Track => "track",
        }
    }
}

impl fmt::Display for MediaClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the browse tree
///
/// Nodes are built per request and handed to the host by value. A node is
/// either a playable leaf or an expandable container, never both.
/// `children` is only populated when the caller asked for the node to be
/// expanded; `None` means "not fetched", `Some(vec![])` means "fetched, empty".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowseMediaSource {
    /// Domain of the source that produced the node
    pub domain: String,
    /// Opaque identifier, `None` for the root of a source
    pub identifier: Option<String>,
    /// Node classification
    pub media_class: MediaClass,
    /// Content type: a MIME type for playable leaves, [`MEDIA_TYPE_NONE`] otherwise
    pub media_content_type: String,
    /// Display title
    pub title: String,
    /// The node can be handed to `resolve_media`
    pub can_play: bool,
    /// The node can be browsed further
    pub can_expand: bool,
    /// Thumbnail URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Direct children, when expanded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BrowseMediaSource>>,
    /// Class shared by the children, used by the UI for grouping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children_media_class: Option<MediaClass>,
}

impl BrowseMediaSource {
    /// Creates a node that is neither playable nor expandable yet
    pub fn new(
        domain: impl Into<String>,
        identifier: Option<String>,
        media_class: MediaClass,
        title: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            identifier,
            media_class,
            media_content_type: MEDIA_TYPE_NONE.to_string(),
            title: title.into(),
            can_play: false,
            can_expand: false,
            thumbnail: None,
            children: None,
            children_media_class: None,
        }
    }

    /// Marks the node as a playable leaf with the given content type
    pub fn playable(mut self, content_type: impl Into<String>) -> Self {
        self.media_content_type = content_type.into();
        self.can_play = true;
        self.can_expand = false;
        self
    }

    /// Marks the node as an expandable container
    pub fn expandable(mut self) -> Self {
        self.can_play = false;
        self.can_expand = true;
        self
    }

    /// Sets the thumbnail URL
    pub fn with_thumbnail(mut self, thumbnail: Option<String>) -> Self {
        self.thumbnail = thumbnail;
        self
    }

    /// Attaches the expanded children and their shared class
    pub fn with_children(mut self, class: MediaClass, children: Vec<BrowseMediaSource>) -> Self {
        self.children_media_class = Some(class);
        self.children = Some(children);
        self
    }

    /// Returns the children, or an empty slice when the node was not expanded
    pub fn children(&self) -> &[BrowseMediaSource] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Returns true for the root node of a source
    pub fn is_root(&self) -> bool {
        self.identifier.is_none()
    }
}

/// Playback descriptor returned by `resolve_media`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayMedia {
    /// Stream URL
    pub url: String,
    /// MIME type of the stream
    pub mime_type: String,
}

impl PlayMedia {
    pub fn new(url: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            mime_type: mime_type.into(),
        }
    }
}
