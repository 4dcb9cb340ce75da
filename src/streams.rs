//! Media stream classification.
//!
//! A player response carries one muxed list of adaptive format descriptors;
//! classification splits it into typed audio and video descriptors by MIME
//! major type. The enclosing renderer of `streamingData` differs between
//! response variants, so the section is located by deep key search instead
//! of a fixed path.
//!
//! Classification is fail-fast over the batch: a descriptor of an unmodeled
//! major type or with a missing required field fails the whole call.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use std::time::Duration;

use crate::coerce;
use crate::error::{Result, YtMusicError};
use crate::models::{AudioStream, MediaStream, StreamContainer, VideoStream};
use crate::navigate::{find_all_by_key, select_optional};
use crate::selectors;

/// MIME type split into routing and container parts.
struct MimeParts {
    major: String,
    container: StreamContainer,
}

/// Split `audio/mp4; codecs="mp4a.40.2"` into its major type, container
/// format, and codec string.
fn split_mime(mime: &str) -> Result<MimeParts> {
    let mismatch = || YtMusicError::TypeMismatch {
        path: "mimeType".to_string(),
        expected: "mime type with codecs attribute",
        found: "string",
    };

    let (major, rest) = mime.split_once('/').ok_or_else(mismatch)?;
    let format = rest.split(';').next().ok_or_else(mismatch)?;
    let codecs = mime.split('"').nth(1).ok_or_else(mismatch)?;

    Ok(MimeParts {
        major: major.to_string(),
        container: StreamContainer {
            format: format.to_string(),
            codecs: codecs.to_string(),
        },
    })
}

/// The descriptor's last-modified timestamp is Unix microseconds; absent
/// or unrepresentable values fall back to `now`.
fn last_modified_at(descriptor: &Value, now: DateTime<Utc>) -> DateTime<Utc> {
    select_optional(descriptor, "lastModified")
        .and_then(int_or_string)
        .and_then(|micros| Utc.timestamp_millis_opt(micros / 1000).single())
        .unwrap_or(now)
}

/// Numeric fields arrive either as JSON numbers or as decimal strings,
/// depending on magnitude.
fn int_or_string(node: &Value) -> Option<i64> {
    node.as_i64().or_else(|| node.as_str()?.parse().ok())
}

fn required_u64(descriptor: &Value, path: &str) -> Result<u64> {
    let resolved = crate::navigate::select(descriptor, path)?;
    int_or_string(resolved)
        .and_then(|n| u64::try_from(n).ok())
        .ok_or_else(|| YtMusicError::TypeMismatch {
            path: path.to_string(),
            expected: "number",
            found: coerce::json_kind(resolved),
        })
}

fn optional_u64(descriptor: &Value, path: &str) -> Option<u64> {
    int_or_string(select_optional(descriptor, path)?).and_then(|n| u64::try_from(n).ok())
}

/// Classify one adaptive format descriptor.
///
/// `now` stands in for an absent last-modified timestamp, supplied by the
/// caller so classification stays deterministic.
pub fn classify_format(descriptor: &Value, now: DateTime<Utc>) -> Result<MediaStream> {
    let mime = selectors::select_string(descriptor, "mimeType")?;
    let parts = split_mime(&mime)?;

    let itag = required_u64(descriptor, "itag")?;
    let url = selectors::select_string(descriptor, "url")?;
    let last_modified_at = last_modified_at(descriptor, now);
    // Duration::MAX: unbounded, e.g. a live stream.
    let duration = optional_u64(descriptor, "approxDurationMs")
        .map(Duration::from_millis)
        .unwrap_or(Duration::MAX);
    // u64::MAX: length not yet known, to be discovered by a range probe.
    let content_length = optional_u64(descriptor, "contentLength").unwrap_or(u64::MAX);
    let bitrate = required_u64(descriptor, "bitrate")?;
    let quality = selectors::select_string(descriptor, "quality")?;

    match parts.major.as_str() {
        "audio" => Ok(MediaStream::Audio(AudioStream {
            itag,
            url,
            container: parts.container,
            last_modified_at,
            duration,
            content_length,
            bitrate,
            quality,
            sample_rate: required_u64(descriptor, "audioSampleRate")?,
            channels: required_u64(descriptor, "audioChannels")?,
            loudness_db: select_optional(descriptor, "loudnessDb")
                .and_then(Value::as_f64)
                .unwrap_or(0.0),
        })),
        "video" => Ok(MediaStream::Video(VideoStream {
            itag,
            url,
            container: parts.container,
            last_modified_at,
            duration,
            content_length,
            bitrate,
            framerate: required_u64(descriptor, "fps")?,
            quality,
            quality_label: selectors::select_string(descriptor, "qualityLabel")?,
            width: required_u64(descriptor, "width")?,
            height: required_u64(descriptor, "height")?,
        })),
        _ => Err(YtMusicError::UnsupportedStreamKind(mime)),
    }
}

/// Classify every adaptive format of a player response.
///
/// An absent `adaptiveFormats` list (a deferred or restricted response)
/// yields an empty set, not an error.
pub fn classify_streams(response: &Value, now: DateTime<Utc>) -> Result<Vec<MediaStream>> {
    let Some(streaming_data) = find_all_by_key(response, "streamingData").into_iter().next() else {
        return Err(YtMusicError::PathNotFound {
            path: "streamingData".to_string(),
        });
    };

    let Some(formats) = streaming_data
        .get("adaptiveFormats")
        .and_then(Value::as_array)
    else {
        return Ok(Vec::new());
    };

    formats
        .iter()
        .map(|descriptor| classify_format(descriptor, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn audio_descriptor() -> Value {
        json!({
            "itag": 140,
            "url": "https://example.com/a",
            "mimeType": "audio/mp4; codecs=\"mp4a.40.2\"",
            "bitrate": 130_000,
            "lastModified": "1700000000000000",
            "approxDurationMs": "204000",
            "contentLength": "3300000",
            "quality": "tiny",
            "audioSampleRate": "44100",
            "audioChannels": 2,
            "loudnessDb": -3.5
        })
    }

    fn video_descriptor() -> Value {
        json!({
            "itag": 136,
            "url": "https://example.com/v",
            "mimeType": "video/webm; codecs=\"vp9\"",
            "bitrate": 1_500_000,
            "approxDurationMs": "204000",
            "contentLength": "42000000",
            "quality": "hd720",
            "qualityLabel": "720p",
            "fps": 30,
            "width": 1280,
            "height": 720
        })
    }

    #[test]
    fn test_classify_audio() {
        let now = Utc::now();
        let stream = classify_format(&audio_descriptor(), now).unwrap();

        let MediaStream::Audio(audio) = stream else {
            panic!("expected audio");
        };
        assert_eq!(audio.itag, 140);
        assert_eq!(audio.container.format, "mp4");
        assert_eq!(audio.container.codecs, "mp4a.40.2");
        assert_eq!(audio.duration, Duration::from_secs(204));
        assert_eq!(audio.content_length, 3_300_000);
        assert_eq!(audio.sample_rate, 44_100);
        assert_eq!(audio.channels, 2);
        assert_eq!(audio.loudness_db, -3.5);
        assert_eq!(
            audio.last_modified_at,
            Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
        );
    }

    #[test]
    fn test_classify_video() {
        let now = Utc::now();
        let stream = classify_format(&video_descriptor(), now).unwrap();

        let MediaStream::Video(video) = stream else {
            panic!("expected video");
        };
        assert_eq!(video.container.format, "webm");
        assert_eq!(video.container.codecs, "vp9");
        assert_eq!(video.quality_label, "720p");
        assert_eq!(video.framerate, 30);
        assert_eq!(video.width, 1280);
        assert_eq!(video.height, 720);
        // No lastModified in the fixture: the reference time stands in.
        assert_eq!(video.last_modified_at, now);
    }

    #[test]
    fn test_classify_absent_fields_use_sentinels() {
        let mut descriptor = audio_descriptor();
        let obj = descriptor.as_object_mut().unwrap();
        obj.remove("approxDurationMs");
        obj.remove("contentLength");
        obj.remove("loudnessDb");

        let MediaStream::Audio(audio) = classify_format(&descriptor, Utc::now()).unwrap() else {
            panic!("expected audio");
        };
        assert_eq!(audio.duration, Duration::MAX);
        assert_eq!(audio.content_length, u64::MAX);
        assert_eq!(audio.loudness_db, 0.0);
    }

    #[test]
    fn test_classify_unsupported_major_type() {
        let mut descriptor = audio_descriptor();
        descriptor["mimeType"] = json!("application/octet-stream; codecs=\"none\"");

        let err = classify_format(&descriptor, Utc::now()).unwrap_err();
        match err {
            YtMusicError::UnsupportedStreamKind(mime) => {
                assert!(mime.starts_with("application/"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_classify_missing_required_field() {
        let mut descriptor = video_descriptor();
        descriptor.as_object_mut().unwrap().remove("fps");

        let err = classify_format(&descriptor, Utc::now()).unwrap_err();
        match err {
            YtMusicError::PathNotFound { path } => assert_eq!(path, "fps"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_classify_streams_deep_search() {
        let now = Utc::now();
        let response = json!({
            "playabilityStatus": { "status": "OK" },
            "streamingData": {
                "expiresInSeconds": "21540",
                "adaptiveFormats": [audio_descriptor(), video_descriptor()]
            }
        });

        let streams = classify_streams(&response, now).unwrap();
        assert_eq!(streams.len(), 2);
        assert!(streams[0].is_audio());
        assert!(!streams[1].is_audio());
    }

    #[test]
    fn test_classify_streams_fail_fast() {
        let mut bad = video_descriptor();
        bad["mimeType"] = json!("text/plain; codecs=\"none\"");
        let response = json!({
            "streamingData": { "adaptiveFormats": [audio_descriptor(), bad] }
        });

        assert!(classify_streams(&response, Utc::now()).is_err());
    }

    #[test]
    fn test_classify_streams_without_formats() {
        let response = json!({ "streamingData": { "expiresInSeconds": "21540" } });
        assert!(classify_streams(&response, Utc::now()).unwrap().is_empty());

        let no_section = json!({ "playabilityStatus": {} });
        assert!(classify_streams(&no_section, Utc::now()).is_err());
    }
}
