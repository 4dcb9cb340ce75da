//! Song-related models.
//!
//! A song shows up on three distinct surfaces with three distinct column
//! layouts: the library list, an album's track list, and a playlist's track
//! list. Each surface exposes a different subset of fields, so each gets its
//! own model.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::common::{NamedEntity, Radio, Thumbnail};

/// A song from the library list surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Song {
    /// The name of this song.
    pub name: String,

    /// The video id of this song.
    pub id: String,

    /// The artists of this song, in display order.
    pub artists: Vec<NamedEntity>,

    /// The album this song belongs to.
    pub album: NamedEntity,

    /// The duration of this song.
    pub duration: Duration,

    /// Whether this song carries the explicit-content badge.
    pub is_explicit: bool,

    /// The radio channel seeded by this song.
    pub radio: Radio,

    /// The thumbnails of this song, ascending resolution.
    pub thumbnails: Vec<Thumbnail>,
}

impl Song {
    /// Get all artist names joined by a separator.
    pub fn artists_string(&self, separator: &str) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Get the url of this song on the service.
    pub fn url(&self) -> String {
        format!("https://music.youtube.com/watch?v={}", self.id)
    }
}

/// A song row inside an album's track list.
///
/// Album rows omit artist and album references (implied by the surface) but
/// carry the track index and play counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AlbumSong {
    /// The name of this song.
    pub name: String,

    /// The video id of this song; absent for unavailable tracks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Whether this song carries the explicit-content badge.
    pub is_explicit: bool,

    /// Localized play-count text, when the surface provides it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plays_info: Option<String>,

    /// The duration of this song.
    pub duration: Duration,

    /// The 1-based track number, when the surface provides it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub song_number: Option<u64>,
}

/// A song row inside a community playlist.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlaylistSong {
    /// The name of this song.
    pub name: String,

    /// The video id of this song; absent for unavailable tracks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The artists of this song, in display order.
    pub artists: Vec<NamedEntity>,

    /// The album this song belongs to, when the row links one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<NamedEntity>,

    /// Whether this song carries the explicit-content badge.
    pub is_explicit: bool,

    /// The duration of this song.
    pub duration: Duration,

    /// The thumbnails of this song, ascending resolution.
    pub thumbnails: Vec<Thumbnail>,
}

impl PlaylistSong {
    /// Get the primary artist name.
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(|a| a.name.as_str())
    }
}
