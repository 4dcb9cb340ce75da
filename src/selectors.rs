//! Shared selectors over renderer trees.
//!
//! These helpers compose [`crate::navigate`] and [`crate::coerce`] into the
//! recurring shapes every surface carries: thumbnail sets, artist run
//! sequences, named entity references, radio descriptors, and explicit
//! badges. The schema-sniffing heuristics the assemblers rely on (trailing
//! navigation marker, album subtype) live here as named functions so drift
//! in the response schema surfaces as one failing unit rather than silent
//! misindexing.

use serde_json::Value;

use crate::coerce;
use crate::error::{Result, YtMusicError};
use crate::models::common::{NamedEntity, Radio, Thumbnail};
use crate::navigate::{select, select_optional};

/// Badge icon type marking explicit content.
pub const EXPLICIT_BADGE_ICON: &str = "MUSIC_EXPLICIT_BADGE";

/// Creator name used when a playlist's creator run carries no browse id.
pub const PLATFORM_CREATOR: &str = "YouTube Music";

/// Select a required string.
pub fn select_string(node: &Value, path: &str) -> Result<String> {
    let resolved = select(node, path)?;
    coerce::as_str(resolved, path).map(str::to_string)
}

/// Select an optional string.
pub fn select_string_optional(node: &Value, path: &str) -> Option<String> {
    select_optional(node, path)?.as_str().map(str::to_string)
}

/// Select a required integer, accepting numeric strings.
///
/// Several surfaces stringify numbers (years, track indices), so a string
/// node holding digits coerces too.
pub fn select_int(node: &Value, path: &str) -> Result<i64> {
    let resolved = select(node, path)?;
    int_from(resolved).ok_or_else(|| YtMusicError::TypeMismatch {
        path: path.to_string(),
        expected: "number",
        found: coerce::json_kind(resolved),
    })
}

/// Select an optional integer, accepting numeric strings.
pub fn select_int_optional(node: &Value, path: &str) -> Option<i64> {
    int_from(select_optional(node, path)?)
}

fn int_from(node: &Value) -> Option<i64> {
    node.as_i64().or_else(|| node.as_str()?.trim().parse().ok())
}

/// A pixel dimension; negative or oversized values clamp to zero, the same
/// as an absent one.
fn dimension_from(node: &Value) -> Option<u32> {
    int_from(node).and_then(|n| u32::try_from(n).ok())
}

/// Select a thumbnail set.
///
/// An absent container yields an empty set; entries without a url are
/// skipped, entries without dimensions get zero dimensions.
pub fn select_thumbnails(node: &Value, path: &str) -> Vec<Thumbnail> {
    let Some(entries) = select_optional(node, path).and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let url = entry.get("url")?.as_str()?;
            let width = entry.get("width").and_then(dimension_from).unwrap_or(0);
            let height = entry.get("height").and_then(dimension_from).unwrap_or(0);
            Some(Thumbnail::new(url, width, height))
        })
        .collect()
}

/// Select a named entity: required name, optional id.
pub fn select_named_entity(node: &Value, name_path: &str, id_path: &str) -> Result<NamedEntity> {
    Ok(NamedEntity::new(
        select_string(node, name_path)?,
        select_string_optional(node, id_path),
    ))
}

/// Select a named entity where the whole reference may be absent; `None`
/// when the name does not resolve.
pub fn select_named_entity_optional(
    node: &Value,
    name_path: &str,
    id_path: &str,
) -> Option<NamedEntity> {
    let name = select_string_optional(node, name_path)?;
    Some(NamedEntity::new(name, select_string_optional(node, id_path)))
}

/// Select a required radio descriptor.
pub fn select_radio(
    node: &Value,
    playlist_id_path: &str,
    video_id_path: Option<&str>,
) -> Result<Radio> {
    Ok(Radio::new(
        select_string(node, playlist_id_path)?,
        video_id_path.and_then(|path| select_string_optional(node, path)),
    ))
}

/// Select an optional radio descriptor; `None` when the playlist id is
/// absent (not every surface exposes a radio).
pub fn select_radio_optional(
    node: &Value,
    playlist_id_path: &str,
    video_id_path: Option<&str>,
) -> Option<Radio> {
    let playlist_id = select_string_optional(node, playlist_id_path)?;
    Some(Radio::new(
        playlist_id,
        video_id_path.and_then(|path| select_string_optional(node, path)),
    ))
}

/// True iff any badge in the list carries the explicit icon type.
///
/// An absent or empty badge list is not explicit, not an error.
pub fn select_is_explicit(node: &Value, badges_path: &str) -> bool {
    let Some(badges) = select_optional(node, badges_path).and_then(Value::as_array) else {
        return false;
    };

    badges.iter().any(|badge| {
        select_optional(badge, "musicInlineBadgeRenderer.icon.iconType")
            .and_then(Value::as_str)
            .map(|icon| icon == EXPLICIT_BADGE_ICON)
            .unwrap_or(false)
    })
}

/// Whether a run is a pure separator glyph between artist names.
pub fn is_separator_run(text: &str) -> bool {
    matches!(text, "," | "&" | "•")
}

/// Collect artists from a run sequence.
///
/// Iterates runs from `start_index` up to `len − trim_by`, drops separator
/// runs, and takes each remaining run's text plus optional browse id. The
/// caller chooses the window because the surrounding runs differ per surface
/// (leading subtype token, trailing year or view count).
pub fn select_artists(
    node: &Value,
    runs_path: &str,
    start_index: usize,
    trim_by: usize,
) -> Result<Vec<NamedEntity>> {
    let runs = coerce::as_array(select(node, runs_path)?, runs_path)?;
    let end = runs.len().saturating_sub(trim_by);

    let mut artists = Vec::new();
    for run in runs.iter().take(end).skip(start_index) {
        let Some(text) = run.get("text").and_then(Value::as_str) else {
            continue;
        };
        let text = text.trim();
        if text.is_empty() || is_separator_run(text) {
            continue;
        }

        artists.push(NamedEntity::new(
            text,
            select_string_optional(run, "navigationEndpoint.browseEndpoint.browseId"),
        ));
    }

    Ok(artists)
}

/// Whether the last run of a sequence carries a navigation endpoint.
///
/// Presence or absence of this marker shifts which run holds the trailing
/// count/year token, so it is probed before any index arithmetic.
pub fn has_trailing_navigation(node: &Value, runs_path: &str) -> Result<bool> {
    let runs = coerce::as_array(select(node, runs_path)?, runs_path)?;
    Ok(runs
        .last()
        .map(|run| run.get("navigationEndpoint").is_some())
        .unwrap_or(false))
}

/// The three release layouts the two-row renderer discriminates only
/// through its leading subtitle run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumSubtype {
    /// A full-length album.
    Album,
    /// A single.
    Single,
    /// An extended play.
    Ep,
}

impl AlbumSubtype {
    /// Classify from the leading subtitle run's literal text.
    ///
    /// Anything other than `Album` or `EP` is a single: on the artist-page
    /// layout singles carry no subtype token at all and lead directly with
    /// the release year.
    pub fn detect(first_run_text: &str) -> Self {
        match first_run_text {
            "Album" => AlbumSubtype::Album,
            "EP" => AlbumSubtype::Ep,
            _ => AlbumSubtype::Single,
        }
    }

    /// Subtitle run index holding the release year on the artist-page
    /// surface. Albums and EPs interpose a separator run after the subtype
    /// token; singles place the year first.
    pub fn year_run_index(self) -> usize {
        match self {
            AlbumSubtype::Album | AlbumSubtype::Ep => 2,
            AlbumSubtype::Single => 0,
        }
    }

    /// Whether this is a single.
    pub fn is_single(self) -> bool {
        self == AlbumSubtype::Single
    }

    /// Whether this is an EP.
    pub fn is_ep(self) -> bool {
        self == AlbumSubtype::Ep
    }
}
