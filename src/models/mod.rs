//! Data models for YouTube Music API responses.
//!
//! This module contains all the data structures used to represent songs,
//! albums, artists, playlists, podcasts, and media stream descriptors.

pub mod album;
pub mod artist;
pub mod common;
pub mod playlist;
pub mod podcast;
pub mod song;
pub mod streaming;

// Re-exports for convenience
pub use album::Album;
pub use artist::{Artist, Subscription};
pub use common::{NamedEntity, Radio, Thumbnail};
pub use playlist::CommunityPlaylist;
pub use podcast::{Episode, Podcast};
pub use song::{AlbumSong, PlaylistSong, Song};
pub use streaming::{AudioStream, MediaStream, StreamContainer, VideoStream};
