//! The active playback resource.
//!
//! The player holds exactly one [`Playback`] at a time, acquired through
//! [`CatalogRepository::open_playback`] and released explicitly via
//! [`Session::end_playback`] (player close or navigation away).  The UI
//! never has to infer "what is playing" from its own widgets.
//!
//! [`CatalogRepository::open_playback`]: crate::catalog::CatalogRepository::open_playback
//! [`Session::end_playback`]: crate::session::Session::end_playback

use maqra_shared::{BlobKey, VideoId};

/// What the player should actually load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackSource {
    /// Platform video rendered in an embedded frame.
    Embed { url: String },
    /// Direct remote media URL handed to a native `<video>` element.
    Direct { url: String },
    /// Locally stored media: the raw bytes and their inferred MIME type.
    Media {
        blob_key: BlobKey,
        mime: &'static str,
        bytes: Vec<u8>,
    },
}

/// A resolved, ready-to-play video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    pub id: VideoId,
    pub title: String,
    pub description: String,
    pub source: PlaybackSource,
}

impl Playback {
    /// Whether this playback holds media bytes in memory (local uploads).
    pub fn is_local_media(&self) -> bool {
        matches!(self.source, PlaybackSource::Media { .. })
    }
}
