//! Data structures mirroring the Jellyfin item model
//!
//! Only the fields the source consumes are decoded. String-valued
//! classifications (`Type`, `CollectionType`, `MediaType`) are mapped to closed
//! enums at the JSON boundary; unknown values land in an `Other` variant that
//! keeps the raw string for error messages.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Generates a string-backed classification enum with an `Other` fallback
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// Value with no dedicated variant
            Other(String),
        }

        impl $name {
            /// Returns the value as sent by the server
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::Other(s) => s,
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($wire => $name::$variant,)+
                    _ => $name::Other(value),
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::from(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// Item classification (`Type` field)
    ItemType {
        Library => "CollectionFolder",
        Artist => "MusicArtist",
        Album => "MusicAlbum",
        Audio => "Audio",
    }
}

string_enum! {
    /// Library classification (`CollectionType` field)
    CollectionType {
        Music => "music",
        Movies => "movies",
        TvShows => "tvshows",
    }
}

string_enum! {
    /// Playable media classification (`MediaType` field)
    MediaType {
        Audio => "Audio",
        Video => "Video",
    }
}

impl Default for ItemType {
    fn default() -> Self {
        ItemType::Other(String::new())
    }
}

/// Collection types the server may expose as top-level libraries
pub const SUPPORTED_COLLECTION_TYPES: &[CollectionType] = &[
    CollectionType::Music,
    CollectionType::Movies,
    CollectionType::TvShows,
];

/// A file backing a playable item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MediaSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub container: Option<String>,
}

/// A Jellyfin item (library, artist, album, track, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RemoteItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "Type", default)]
    pub item_type: ItemType,
    #[serde(default)]
    pub collection_type: Option<CollectionType>,
    #[serde(default)]
    pub index_number: Option<u32>,
    #[serde(default)]
    pub image_tags: HashMap<String, String>,
    #[serde(default)]
    pub media_type: Option<MediaType>,
    #[serde(default)]
    pub media_sources: Vec<MediaSource>,
}

impl RemoteItem {
    /// Returns the version tag of an image kind, if the item has one
    pub fn image_tag(&self, kind: &str) -> Option<&str> {
        self.image_tags.get(kind).map(String::as_str)
    }

    /// Returns the path of the first media source
    pub fn primary_path(&self) -> Option<&str> {
        self.media_sources.first()?.path.as_deref()
    }
}

/// Listing returned by folder and user-item queries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemsResponse {
    #[serde(default)]
    pub items: Vec<RemoteItem>,
    #[serde(default)]
    pub total_record_count: Option<u32>,
}

/// Query of the user-items endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserItemsQuery {
    pub recursive: bool,
    pub parent_id: Option<String>,
    pub include_item_types: Option<ItemType>,
    pub fields: Vec<String>,
}

impl UserItemsQuery {
    /// Recursive listing of the items of one type below a parent
    pub fn children_of(parent_id: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            recursive: true,
            parent_id: Some(parent_id.into()),
            include_item_types: Some(item_type),
            fields: Vec::new(),
        }
    }

    /// Adds an extra field to the response
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Renders the query as URL parameters
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if self.recursive {
            params.push(("Recursive", "true".to_string()));
        }
        if let Some(parent_id) = &self.parent_id {
            params.push(("ParentId", parent_id.clone()));
        }
        if let Some(item_type) = &self.include_item_types {
            params.push(("IncludeItemTypes", item_type.to_string()));
        }
        if !self.fields.is_empty() {
            params.push(("Fields", self.fields.join(",")));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_track() {
        let item: RemoteItem = serde_json::from_value(json!({
            "Id": "t1",
            "Name": "So What",
            "Type": "Audio",
            "IndexNumber": 1,
            "MediaType": "Audio",
            "ImageTags": { "Primary": "abc" },
            "MediaSources": [{ "Id": "s1", "Path": "/music/kind_of_blue/01.flac" }],
            "RunTimeTicks": 5_640_000_000u64
        }))
        .unwrap();

        assert_eq!(item.item_type, ItemType::Audio);
        assert_eq!(item.media_type, Some(MediaType::Audio));
        assert_eq!(item.index_number, Some(1));
        assert_eq!(item.image_tag("Primary"), Some("abc"));
        assert_eq!(item.primary_path(), Some("/music/kind_of_blue/01.flac"));
    }

    #[test]
    fn test_unknown_values_are_kept() {
        let item: RemoteItem = serde_json::from_value(json!({
            "Id": "f1",
            "Name": "Books",
            "Type": "Folder",
            "CollectionType": "books"
        }))
        .unwrap();

        assert_eq!(item.item_type, ItemType::Other("Folder".to_string()));
        assert_eq!(item.item_type.to_string(), "Folder");
        assert_eq!(
            item.collection_type,
            Some(CollectionType::Other("books".to_string()))
        );
        assert!(item.image_tags.is_empty());
        assert!(item.primary_path().is_none());
    }

    #[test]
    fn test_query_params() {
        let query = UserItemsQuery::children_of("album-1", ItemType::Audio).with_field("MediaSources");
        assert_eq!(
            query.to_params(),
            vec![
                ("Recursive", "true".to_string()),
                ("ParentId", "album-1".to_string()),
                ("IncludeItemTypes", "Audio".to_string()),
                ("Fields", "MediaSources".to_string()),
            ]
        );
    }

    #[test]
    fn test_collection_type_serializes_as_wire_value() {
        let value = serde_json::to_value(CollectionType::TvShows).unwrap();
        assert_eq!(value, json!("tvshows"));
    }
}
