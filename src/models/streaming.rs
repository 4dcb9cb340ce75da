//! Media stream descriptor models.
//!
//! Adaptive format descriptors are muxed audio and video entries in one
//! list; the classifier splits them into the two typed descriptors here.
//!
//! Sentinel conventions for fields the service omits until probed:
//! `duration == Duration::MAX` means unbounded (live), and
//! `content_length == u64::MAX` means not yet known and must be discovered
//! by a range probe. `loudness_db` is the one field with a real zero default.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The container half of a parsed MIME type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StreamContainer {
    /// Container format, e.g. `mp4` or `webm`.
    pub format: String,

    /// Codec string from the MIME `codecs` attribute, e.g. `opus` or
    /// `avc1.4d401f`.
    pub codecs: String,
}

/// An audio stream descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudioStream {
    /// The itag identifying this format.
    pub itag: u64,

    /// Direct media url.
    pub url: String,

    /// Container and codec information.
    pub container: StreamContainer,

    /// When the media was last modified; falls back to the caller-supplied
    /// reference time when the descriptor omits it.
    pub last_modified_at: DateTime<Utc>,

    /// Approximate duration; `Duration::MAX` when unbounded.
    pub duration: Duration,

    /// Content length in bytes; `u64::MAX` when not yet known.
    pub content_length: u64,

    /// Bitrate in bits per second.
    pub bitrate: u64,

    /// Quality label of this stream.
    pub quality: String,

    /// Sample rate in Hz.
    pub sample_rate: u64,

    /// Channel count.
    pub channels: u64,

    /// Loudness in dB; 0.0 when the descriptor omits it.
    pub loudness_db: f64,
}

/// A video stream descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoStream {
    /// The itag identifying this format.
    pub itag: u64,

    /// Direct media url.
    pub url: String,

    /// Container and codec information.
    pub container: StreamContainer,

    /// When the media was last modified; falls back to the caller-supplied
    /// reference time when the descriptor omits it.
    pub last_modified_at: DateTime<Utc>,

    /// Approximate duration; `Duration::MAX` when unbounded.
    pub duration: Duration,

    /// Content length in bytes; `u64::MAX` when not yet known.
    pub content_length: u64,

    /// Bitrate in bits per second.
    pub bitrate: u64,

    /// Frames per second.
    pub framerate: u64,

    /// Quality name, e.g. `hd720`.
    pub quality: String,

    /// Quality label, e.g. `720p`.
    pub quality_label: String,

    /// Frame width in pixels.
    pub width: u64,

    /// Frame height in pixels.
    pub height: u64,
}

/// Either kind of stream descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaStream {
    /// An audio descriptor.
    Audio(AudioStream),

    /// A video descriptor.
    Video(VideoStream),
}

impl MediaStream {
    /// Direct media url of this descriptor.
    pub fn url(&self) -> &str {
        match self {
            MediaStream::Audio(audio) => &audio.url,
            MediaStream::Video(video) => &video.url,
        }
    }

    /// Bitrate in bits per second.
    pub fn bitrate(&self) -> u64 {
        match self {
            MediaStream::Audio(audio) => audio.bitrate,
            MediaStream::Video(video) => video.bitrate,
        }
    }

    /// Whether this is an audio descriptor.
    pub fn is_audio(&self) -> bool {
        matches!(self, MediaStream::Audio(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_stream_accessors() {
        let stream = MediaStream::Video(VideoStream {
            itag: 22,
            url: "https://example.com/v".to_string(),
            container: StreamContainer {
                format: "mp4".to_string(),
                codecs: "avc1".to_string(),
            },
            last_modified_at: Utc::now(),
            duration: Duration::from_secs(60),
            content_length: 1024,
            bitrate: 2_000_000,
            framerate: 30,
            quality: "hd720".to_string(),
            quality_label: "720p".to_string(),
            width: 1280,
            height: 720,
        });

        assert!(!stream.is_audio());
        assert_eq!(stream.bitrate(), 2_000_000);
        assert_eq!(stream.url(), "https://example.com/v");
    }
}
