//! API client for YouTube Music.
//!
//! This module provides [`YtMusicApi`], a client for the internal
//! music.youtube.com endpoints: library browsing, watch-queue expansion,
//! and player/streaming data.

pub mod client;

pub use client::YtMusicApi;
