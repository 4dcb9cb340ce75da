//! Album-related models.

use serde::{Deserialize, Serialize};

use super::common::{NamedEntity, Radio, Thumbnail};

/// An album, EP, or single.
///
/// The service renders all three with the same two-row layout and
/// discriminates them only through the leading subtitle run, so one model
/// covers all three with the `is_single`/`is_ep` flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Album {
    /// The name of this album.
    pub name: String,

    /// The id of this album.
    pub id: String,

    /// The artists of this album. Empty on the artist-page surface, where
    /// the owning artist is implied.
    pub artists: Vec<NamedEntity>,

    /// The release year of this album.
    pub release_year: i32,

    /// Whether this album is a single.
    pub is_single: bool,

    /// Whether this album is an EP.
    pub is_ep: bool,

    /// Whether this album carries the explicit-content badge.
    pub is_explicit: bool,

    /// The radio channel of this album, when the surface exposes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radio: Option<Radio>,

    /// The thumbnails of this album, ascending resolution.
    pub thumbnails: Vec<Thumbnail>,
}

impl Album {
    /// Whether this is a full-length album (neither single nor EP).
    pub fn is_full_album(&self) -> bool {
        !self.is_single && !self.is_ep
    }

    /// Get all artist names joined by a separator.
    pub fn artists_string(&self, separator: &str) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }
}
