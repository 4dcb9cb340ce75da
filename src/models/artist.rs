//! Artist-related models.

use serde::{Deserialize, Serialize};

use super::common::{Radio, Thumbnail};

/// An artist from the library surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Artist {
    /// The name of this artist.
    pub name: String,

    /// The channel id of this artist, with the library browse prefix
    /// stripped.
    pub id: String,

    /// How many songs by this artist are in the library.
    pub song_count: u64,

    /// The radio channel of this artist, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radio: Option<Radio>,

    /// The thumbnails of this artist, ascending resolution.
    pub thumbnails: Vec<Thumbnail>,
}

/// A channel subscription.
///
/// Structurally close to [`Artist`] but keyed by the raw browse id and
/// described by a localized subscriber-count string instead of a song count.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Subscription {
    /// The name of this channel.
    pub name: String,

    /// The browse id of this channel.
    pub id: String,

    /// Localized subscriber-count text, e.g. `"1.2M subscribers"`.
    pub subscribers_info: String,

    /// The radio channel of this artist, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radio: Option<Radio>,

    /// The thumbnails of this channel, ascending resolution.
    pub thumbnails: Vec<Thumbnail>,
}
