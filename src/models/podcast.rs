//! Podcast and episode models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{NamedEntity, Thumbnail};

/// A podcast show from the library surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Podcast {
    /// The name of this podcast.
    pub name: String,

    /// The playlist id of this podcast.
    pub id: String,

    /// The host channel of this podcast.
    pub host: NamedEntity,

    /// The thumbnails of this podcast, ascending resolution.
    pub thumbnails: Vec<Thumbnail>,
}

/// A podcast episode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Episode {
    /// The name of this episode.
    pub name: String,

    /// The video id of this episode.
    pub id: String,

    /// The podcast this episode belongs to.
    pub podcast: NamedEntity,

    /// When this episode was released. Relative descriptions ("3 days ago")
    /// are resolved against the caller-supplied reference time.
    pub released_at: DateTime<Utc>,

    /// Whether likes are allowed for this episode.
    pub is_likes_allowed: bool,

    /// The thumbnails of this episode, ascending resolution.
    pub thumbnails: Vec<Thumbnail>,
}

impl Episode {
    /// Get the url of this episode on the service.
    pub fn url(&self) -> String {
        format!("https://music.youtube.com/watch?v={}", self.id)
    }
}
