//! # ytmusic
//!
//! A Rust client and extraction engine for the internal YouTube Music API.
//!
//! The service answers with deeply nested, undocumented renderer trees whose
//! shape shifts between surfaces. This crate turns those trees into typed
//! entities through a path-based extraction pipeline:
//!
//! - [`navigate`] - generic tree navigation by path expression
//! - [`coerce`] - scalar coercion: durations, dates, localized counts
//! - [`selectors`] - shared renderer shapes: thumbnails, artist runs, badges
//! - [`assemblers`] - one pure assembly function per entity kind
//! - [`streams`] - adaptive format classification into audio/video streams
//!
//! Assembly is all-or-nothing and every failure names the exact path
//! expression that broke, so a captured raw response can be diagnosed
//! directly.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ytmusic::YtMusicApi;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = YtMusicApi::with_cookies("US", "SAPISID=...; ...")?;
//!
//!     for album in api.get_library_albums().await? {
//!         println!("{} ({})", album.name, album.release_year);
//!     }
//!
//!     let streams = api.get_streaming_data("dQw4w9WgXcQ").await?;
//!     if let Some(best) = streams.iter().filter(|s| s.is_audio()).max_by_key(|s| s.bitrate()) {
//!         println!("best audio: {}", best.url());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! The extraction pipeline itself is synchronous and side-effect-free; a
//! raw tree obtained elsewhere can be fed straight to the [`assemblers`]
//! without a client.

pub mod api;
pub mod assemblers;
pub mod coerce;
pub mod error;
pub mod models;
pub mod navigate;
pub mod selectors;
pub mod streams;

pub use api::YtMusicApi;
pub use error::YtMusicError;
pub use models::{
    Album, AlbumSong, Artist, AudioStream, CommunityPlaylist, Episode, MediaStream, NamedEntity,
    PlaylistSong, Podcast, Radio, Song, StreamContainer, Subscription, Thumbnail, VideoStream,
};
