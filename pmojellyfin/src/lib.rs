//! # pmojellyfin - Jellyfin music source for PMOMusic
//!
//! This crate exposes the music libraries of a Jellyfin server as a
//! [`pmosource::MediaSource`]: a browsable tree of libraries, artists, albums
//! and tracks, plus resolution of a track into a streamable URL.
//!
//! ## Architecture
//!
//! - [`JellyfinSource`]: the media source, builds tree nodes on demand
//! - [`api`]: the blocking [`JellyfinApi`] trait and its `ureq` client
//! - [`models`]: the subset of the Jellyfin item model the source reads
//! - [`config`]: YAML configuration and the authenticated session
//! - [`urls`]: thumbnail and audio stream URL templates
//! - [`error`]: error handling
//!
//! ## Module structure
//!
//! ```text
//! pmojellyfin/
//! ├── src/
//! │   ├── lib.rs          # Main module (this file)
//! │   ├── source.rs       # JellyfinSource and the tree builders
//! │   ├── models.rs       # Item, listing and query structures
//! │   ├── api/
//! │   │   ├── mod.rs      # JellyfinApi trait
//! │   │   └── http.rs     # ureq implementation
//! │   ├── config.rs       # Configuration and session
//! │   ├── urls.rs         # URL templates
//! │   ├── constants.rs    # Domain, client identification, bitrate
//! │   └── error.rs        # Error handling
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pmojellyfin::{JellyfinConfig, JellyfinSource};
//! use pmosource::{MediaSource, MediaSourceItem};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = JellyfinConfig::load("jellyfin.yaml")?;
//!     let source = JellyfinSource::from_config(&config)?;
//!
//!     let root = source
//!         .browse_media(&MediaSourceItem::root("jellyfin"), &["Audio"])
//!         .await?;
//!     for library in root.children() {
//!         println!("{}", library.title);
//!     }
//!
//!     let media = source.resolve("a1b2c3").await?;
//!     println!("{} ({})", media.url, media.mime_type);
//!     Ok(())
//! }
//! ```
//!
//! Only music libraries are listed; movie and TV libraries are skipped at the
//! root and rejected when browsed directly.

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod source;
pub mod urls;

pub use api::{HttpJellyfinApi, JellyfinApi};
pub use config::{JellyfinConfig, JellyfinSession};
pub use constants::DOMAIN;
pub use error::{JellyfinError, Result};
pub use models::{CollectionType, ItemType, ItemsResponse, MediaType, RemoteItem, UserItemsQuery};
pub use source::JellyfinSource;
