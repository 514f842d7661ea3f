//! URL construction for thumbnails and audio streams

use crate::config::JellyfinSession;
use crate::constants::{IMAGE_TYPE_PRIMARY, MAX_STREAMING_BITRATE};
use crate::models::RemoteItem;

/// Primary image URL of an item, `None` when the item has no primary image
pub fn thumbnail_url(session: &JellyfinSession, item: &RemoteItem) -> Option<String> {
    let tag = item.image_tag(IMAGE_TYPE_PRIMARY)?;
    Some(format!(
        "{}Items/{}/Images/{}?Tag={}&api_key={}",
        session.base_url(),
        item.id,
        IMAGE_TYPE_PRIMARY,
        tag,
        session.access_token()
    ))
}

/// Universal audio endpoint URL of a track
pub fn audio_stream_url(session: &JellyfinSession, item_id: &str) -> String {
    format!(
        "{}Audio/{}/universal?UserId={}&DeviceId={}&api_key={}&MaxStreamingBitrate={}",
        session.base_url(),
        item_id,
        session.user_id(),
        session.device_id(),
        session.access_token(),
        MAX_STREAMING_BITRATE
    )
}
