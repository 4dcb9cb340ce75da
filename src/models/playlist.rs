//! Playlist-related models.

use serde::{Deserialize, Serialize};

use super::common::{NamedEntity, Radio, Thumbnail};

/// A community playlist from the library surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CommunityPlaylist {
    /// The name of this playlist.
    pub name: String,

    /// The playlist id.
    pub id: String,

    /// The creator of this playlist. When the creator run carries no browse
    /// id the playlist is platform-owned and the creator defaults to
    /// "YouTube Music".
    pub creator: NamedEntity,

    /// The number of songs in this playlist.
    pub song_count: u64,

    /// The radio channel of this playlist, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radio: Option<Radio>,

    /// The thumbnails of this playlist, ascending resolution.
    pub thumbnails: Vec<Thumbnail>,
}

impl CommunityPlaylist {
    /// Get the url of this playlist on the service.
    pub fn url(&self) -> String {
        format!("https://music.youtube.com/playlist?list={}", self.id)
    }
}
