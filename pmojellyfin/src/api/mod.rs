//! Access layer to the Jellyfin REST API
//!
//! The source only depends on the [`JellyfinApi`] trait. Its methods are
//! blocking: callers running on an async runtime must hand them to a blocking
//! executor (the source uses `tokio::task::spawn_blocking`).

mod http;

pub use http::HttpJellyfinApi;

use crate::error::Result;
use crate::models::{ItemsResponse, RemoteItem, UserItemsQuery};

/// Blocking Jellyfin client used by the source
pub trait JellyfinApi: Send + Sync {
    /// Fetches a single item by id
    fn get_item(&self, item_id: &str) -> Result<RemoteItem>;

    /// Lists the top-level folders (libraries) visible to the user
    fn get_media_folders(&self) -> Result<ItemsResponse>;

    /// Lists user items matching a query
    fn user_items(&self, query: &UserItemsQuery) -> Result<ItemsResponse>;
}
