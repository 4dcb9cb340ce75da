//! Common types shared across all models.

use serde::{Deserialize, Serialize};

/// A thumbnail image with its dimensions.
///
/// Thumbnail sets are ordered by ascending resolution as delivered by the
/// service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Thumbnail {
    /// URL to the image.
    pub url: String,

    /// Width in pixels.
    pub width: u32,

    /// Height in pixels.
    pub height: u32,
}

impl Thumbnail {
    /// Create a new thumbnail.
    pub fn new<S: Into<String>>(url: S, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            width,
            height,
        }
    }
}

/// A named reference to another entity (creator, host, album).
///
/// An absent id signals a synthetic or platform-default reference, e.g. a
/// playlist whose creator is the service itself, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NamedEntity {
    /// Display name of the referenced entity.
    pub name: String,

    /// Opaque browse id of the referenced entity, when navigable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl NamedEntity {
    /// Create a new named entity.
    pub fn new<S: Into<String>>(name: S, id: Option<String>) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

/// A radio continuation descriptor enabling open-ended playback from a seed
/// item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Radio {
    /// The radio playlist id.
    pub playlist_id: String,

    /// The seed video id, when the radio starts from a specific item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}

impl Radio {
    /// Create a new radio descriptor.
    pub fn new<S: Into<String>>(playlist_id: S, video_id: Option<String>) -> Self {
        Self {
            playlist_id: playlist_id.into(),
            video_id,
        }
    }
}
