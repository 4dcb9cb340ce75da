//! Entity assembly from renderer trees.
//!
//! One pure function per entity kind, composing the navigator, the coercers,
//! and the shared selectors. Assembly is all-or-nothing: a returned entity
//! has every required field resolved, and any failure propagates with the
//! exact path expression that broke, wrapped in
//! [`YtMusicError::Assembly`] naming the entity kind.
//!
//! Batch assembly is fail-fast: the first malformed child fails the whole
//! list. A skipped child would silently hide schema drift; callers who want
//! per-item recovery can map the single-item functions themselves.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::coerce;
use crate::error::{Result, YtMusicError};
use crate::models::{
    Album, AlbumSong, Artist, CommunityPlaylist, Episode, NamedEntity, PlaylistSong, Podcast, Song,
    Subscription,
};
use crate::navigate::{find_all_by_key, select};
use crate::selectors::{self, AlbumSubtype};

/// Release year substituted when the subtitle layout holds no year token at
/// the expected position.
const FALLBACK_RELEASE_YEAR: i32 = 1970;

/// Library artist ids are the channel id with this browse prefix.
const LIBRARY_ARTIST_ID_PREFIX: &str = "MPLA";

const TWO_ROW_TITLE: &str = "musicTwoRowItemRenderer.title.runs[0].text";
const TWO_ROW_SUBTITLE_RUNS: &str = "musicTwoRowItemRenderer.subtitle.runs";
const TWO_ROW_THUMBNAILS: &str =
    "musicTwoRowItemRenderer.thumbnailRenderer.musicThumbnailRenderer.thumbnail.thumbnails";
const TWO_ROW_OVERLAY_PLAYLIST_ID: &str = "musicTwoRowItemRenderer.thumbnailOverlay.musicItemThumbnailOverlayRenderer.content.musicPlayButtonRenderer.playNavigationEndpoint.watchPlaylistEndpoint.playlistId";
const TWO_ROW_MENU_PLAYLIST_ID: &str = "musicTwoRowItemRenderer.menu.menuRenderer.items[0].menuNavigationItemRenderer.navigationEndpoint.watchPlaylistEndpoint.playlistId";
const TWO_ROW_MENU_RADIO_PLAYLIST_ID: &str = "musicTwoRowItemRenderer.menu.menuRenderer.items[1].menuNavigationItemRenderer.navigationEndpoint.watchPlaylistEndpoint.playlistId";

const LIST_THUMBNAILS: &str =
    "musicResponsiveListItemRenderer.thumbnail.musicThumbnailRenderer.thumbnail.thumbnails";
const LIST_BADGES: &str = "musicResponsiveListItemRenderer.badges";
const LIST_FIXED_DURATION: &str = "musicResponsiveListItemRenderer.fixedColumns[0].musicResponsiveListItemFixedColumnRenderer.text.runs[0].text";
const LIST_BROWSE_ID: &str =
    "musicResponsiveListItemRenderer.navigationEndpoint.browseEndpoint.browseId";
const LIST_RADIO_PLAYLIST_ID: &str = "musicResponsiveListItemRenderer.menu.menuRenderer.items[0].menuNavigationItemRenderer.navigationEndpoint.watchEndpoint.playlistId";
const LIST_RADIO_VIDEO_ID: &str = "musicResponsiveListItemRenderer.menu.menuRenderer.items[0].menuNavigationItemRenderer.navigationEndpoint.watchEndpoint.videoId";
const LIST_MENU_RADIO_PLAYLIST_ID: &str = "musicResponsiveListItemRenderer.menu.menuRenderer.items[1].menuNavigationItemRenderer.navigationEndpoint.watchPlaylistEndpoint.playlistId";

const MULTI_ROW_TITLE: &str = "musicMultiRowListItemRenderer.title.runs[0].text";
const MULTI_ROW_VIDEO_ID: &str = "musicMultiRowListItemRenderer.onTap.watchEndpoint.videoId";
const MULTI_ROW_SUBTITLE_RUNS: &str = "musicMultiRowListItemRenderer.subtitle.runs";
const MULTI_ROW_THUMBNAILS: &str =
    "musicMultiRowListItemRenderer.thumbnail.musicThumbnailRenderer.thumbnail.thumbnails";
const MULTI_ROW_LIKES_ALLOWED: &str = "musicMultiRowListItemRenderer.menu.menuRenderer.topLevelButtons[0].likeButtonRenderer.likesAllowed";

const PANEL_TITLE: &str = "playlistPanelVideoRenderer.title.runs[0].text";
const PANEL_VIDEO_ID: &str = "playlistPanelVideoRenderer.navigationEndpoint.watchEndpoint.videoId";
const PANEL_BYLINE_RUNS: &str = "playlistPanelVideoRenderer.longBylineText.runs";
const PANEL_BADGES: &str = "playlistPanelVideoRenderer.badges";
const PANEL_DURATION: &str = "playlistPanelVideoRenderer.lengthText.runs[0].text";
const PANEL_THUMBNAILS: &str = "playlistPanelVideoRenderer.thumbnail.thumbnails";

/// Path to the one-line text of a flex column.
fn flex_run_text(column: usize) -> String {
    format!(
        "musicResponsiveListItemRenderer.flexColumns[{column}].musicResponsiveListItemFlexColumnRenderer.text.runs[0].text"
    )
}

/// Path to the full run sequence of a flex column.
fn flex_runs(column: usize) -> String {
    format!(
        "musicResponsiveListItemRenderer.flexColumns[{column}].musicResponsiveListItemFlexColumnRenderer.text.runs"
    )
}

/// Song duration lives in the fixed column on the default surface and in
/// flex column 3 on the alternate one; the fixed position is probed first.
fn select_duration_with_fallback(node: &Value) -> Result<std::time::Duration> {
    let text = selectors::select_string_optional(node, LIST_FIXED_DURATION)
        .or_else(|| selectors::select_string_optional(node, &flex_run_text(3)))
        .ok_or_else(|| YtMusicError::PathNotFound {
            path: LIST_FIXED_DURATION.to_string(),
        })?;
    coerce::parse_duration(&text, LIST_FIXED_DURATION)
}

/// Index of the last element of a run/column sequence. An empty sequence
/// cannot hold the trailing field, so it resolves like a missing path.
fn last_index(items: &[Value], path: &str) -> Result<usize> {
    items
        .len()
        .checked_sub(1)
        .ok_or_else(|| YtMusicError::PathNotFound {
            path: format!("{path}[0]"),
        })
}

/// Assemble every child of the array at `path`, fail-fast.
pub fn assemble_all<T>(
    node: &Value,
    path: &str,
    assemble: impl Fn(&Value) -> Result<T>,
) -> Result<Vec<T>> {
    let children = coerce::as_array(select(node, path)?, path)?;
    children.iter().map(assemble).collect()
}

/// Assemble a song from a library list row.
pub fn assemble_song(node: &Value) -> Result<Song> {
    song_inner(node).map_err(|e| e.for_kind("song"))
}

fn song_inner(node: &Value) -> Result<Song> {
    Ok(Song {
        name: selectors::select_string(node, &flex_run_text(0))?,
        id: selectors::select_string(
            node,
            "musicResponsiveListItemRenderer.flexColumns[0].musicResponsiveListItemFlexColumnRenderer.text.runs[0].navigationEndpoint.watchEndpoint.videoId",
        )?,
        artists: selectors::select_artists(node, &flex_runs(1), 0, 0)?,
        album: selectors::select_named_entity(
            node,
            &flex_run_text(2),
            "musicResponsiveListItemRenderer.flexColumns[2].musicResponsiveListItemFlexColumnRenderer.text.runs[0].navigationEndpoint.browseEndpoint.browseId",
        )?,
        duration: select_duration_with_fallback(node)?,
        is_explicit: selectors::select_is_explicit(node, LIST_BADGES),
        radio: selectors::select_radio(node, LIST_RADIO_PLAYLIST_ID, Some(LIST_RADIO_VIDEO_ID))?,
        thumbnails: selectors::select_thumbnails(node, LIST_THUMBNAILS),
    })
}

/// Assemble an album from a library two-row item.
///
/// The subtitle is a variable-length run sequence: subtype token, separator,
/// artist runs, separator, optional year. The year's index depends on how
/// many artist runs precede it and on whether the trailing run is navigable,
/// so both are probed through named predicates before any indexing.
pub fn assemble_album(node: &Value) -> Result<Album> {
    album_inner(node).map_err(|e| e.for_kind("album"))
}

fn album_inner(node: &Value) -> Result<Album> {
    let runs = coerce::as_array(select(node, TWO_ROW_SUBTITLE_RUNS)?, TWO_ROW_SUBTITLE_RUNS)?;

    // A non-navigable trailing run is the year token, not an artist.
    let trim_by = if selectors::has_trailing_navigation(node, TWO_ROW_SUBTITLE_RUNS)? {
        0
    } else {
        1
    };
    let artists = selectors::select_artists(node, TWO_ROW_SUBTITLE_RUNS, 2, trim_by)?;
    let first_artist = artists
        .first()
        .ok_or_else(|| YtMusicError::PathNotFound {
            path: format!("{TWO_ROW_SUBTITLE_RUNS}[2]"),
        })?;

    let year_index = if first_artist.id.is_none() {
        4
    } else {
        artists.len() * 2 + 2
    };
    let release_year = if year_index == runs.len() - 1 {
        selectors::select_int(node, &format!("{TWO_ROW_SUBTITLE_RUNS}[{year_index}].text"))? as i32
    } else {
        FALLBACK_RELEASE_YEAR
    };

    let subtype =
        AlbumSubtype::detect(&selectors::select_string(node, &format!("{TWO_ROW_SUBTITLE_RUNS}[0].text"))?);

    Ok(Album {
        name: selectors::select_string(node, TWO_ROW_TITLE)?,
        id: selectors::select_string(node, TWO_ROW_MENU_PLAYLIST_ID)?,
        artists,
        release_year,
        is_single: subtype.is_single(),
        is_ep: subtype.is_ep(),
        is_explicit: selectors::select_is_explicit(node, "musicTwoRowItemRenderer.subtitleBadges"),
        radio: Some(selectors::select_radio(
            node,
            TWO_ROW_MENU_RADIO_PLAYLIST_ID,
            None,
        )?),
        thumbnails: selectors::select_thumbnails(node, TWO_ROW_THUMBNAILS),
    })
}

/// Assemble an album from an artist-page two-row item.
///
/// This surface implies the artist, leads the subtitle with the subtype
/// token (or directly with the year, for singles), and links the album
/// through the title run.
pub fn assemble_artist_album(node: &Value) -> Result<Album> {
    artist_album_inner(node).map_err(|e| e.for_kind("album"))
}

fn artist_album_inner(node: &Value) -> Result<Album> {
    let subtype = AlbumSubtype::detect(&selectors::select_string(
        node,
        &format!("{TWO_ROW_SUBTITLE_RUNS}[0].text"),
    )?);
    let year_path = format!("{TWO_ROW_SUBTITLE_RUNS}[{}].text", subtype.year_run_index());

    Ok(Album {
        name: selectors::select_string(node, TWO_ROW_TITLE)?,
        id: selectors::select_string(
            node,
            "musicTwoRowItemRenderer.title.runs[0].navigationEndpoint.browseEndpoint.browseId",
        )?,
        artists: Vec::new(),
        release_year: selectors::select_int(node, &year_path)? as i32,
        is_single: subtype.is_single(),
        is_ep: subtype.is_ep(),
        is_explicit: selectors::select_is_explicit(node, "musicTwoRowItemRenderer.subtitleBadges"),
        radio: None,
        thumbnails: selectors::select_thumbnails(node, TWO_ROW_THUMBNAILS),
    })
}

/// Assemble an artist from a library list row.
pub fn assemble_artist(node: &Value) -> Result<Artist> {
    artist_inner(node).map_err(|e| e.for_kind("artist"))
}

fn artist_inner(node: &Value) -> Result<Artist> {
    let browse_id = selectors::select_string(node, LIST_BROWSE_ID)?;
    let id = browse_id
        .strip_prefix(LIBRARY_ARTIST_ID_PREFIX)
        .unwrap_or(&browse_id)
        .to_string();

    let count_path = flex_run_text(1);
    let count_text = selectors::select_string(node, &count_path)?;

    Ok(Artist {
        name: selectors::select_string(node, &flex_run_text(0))?,
        id,
        song_count: coerce::parse_leading_count(&count_text, &count_path)?,
        radio: selectors::select_radio_optional(node, LIST_MENU_RADIO_PLAYLIST_ID, None),
        thumbnails: selectors::select_thumbnails(node, LIST_THUMBNAILS),
    })
}

/// Assemble a channel subscription from a library list row.
pub fn assemble_subscription(node: &Value) -> Result<Subscription> {
    subscription_inner(node).map_err(|e| e.for_kind("subscription"))
}

fn subscription_inner(node: &Value) -> Result<Subscription> {
    Ok(Subscription {
        name: selectors::select_string(node, &flex_run_text(0))?,
        id: selectors::select_string(node, LIST_BROWSE_ID)?,
        subscribers_info: selectors::select_string(node, &flex_run_text(1))?,
        radio: selectors::select_radio_optional(node, LIST_MENU_RADIO_PLAYLIST_ID, None),
        thumbnails: selectors::select_thumbnails(node, LIST_THUMBNAILS),
    })
}

/// Assemble a community playlist from a library two-row item.
pub fn assemble_community_playlist(node: &Value) -> Result<CommunityPlaylist> {
    community_playlist_inner(node).map_err(|e| e.for_kind("community playlist"))
}

fn community_playlist_inner(node: &Value) -> Result<CommunityPlaylist> {
    let runs = coerce::as_array(select(node, TWO_ROW_SUBTITLE_RUNS)?, TWO_ROW_SUBTITLE_RUNS)?;

    // A creator run without a browse id means the playlist is owned by the
    // platform itself.
    let creator_id = selectors::select_string_optional(
        node,
        &format!("{TWO_ROW_SUBTITLE_RUNS}[0].navigationEndpoint.browseEndpoint.browseId"),
    );
    let creator = match creator_id {
        Some(id) => NamedEntity::new(
            selectors::select_string(node, &format!("{TWO_ROW_SUBTITLE_RUNS}[0].text"))?,
            Some(id),
        ),
        None => NamedEntity::new(selectors::PLATFORM_CREATOR, None),
    };

    let count_path = format!(
        "{TWO_ROW_SUBTITLE_RUNS}[{}].text",
        last_index(runs, TWO_ROW_SUBTITLE_RUNS)?
    );
    let count_text = selectors::select_string(node, &count_path)?;

    Ok(CommunityPlaylist {
        name: selectors::select_string(node, TWO_ROW_TITLE)?,
        id: selectors::select_string(node, TWO_ROW_OVERLAY_PLAYLIST_ID)?,
        creator,
        song_count: coerce::parse_leading_count(&count_text, &count_path)?,
        radio: selectors::select_radio_optional(node, TWO_ROW_MENU_RADIO_PLAYLIST_ID, None),
        thumbnails: selectors::select_thumbnails(node, TWO_ROW_THUMBNAILS),
    })
}

/// Assemble a podcast from a library two-row item.
pub fn assemble_podcast(node: &Value) -> Result<Podcast> {
    podcast_inner(node).map_err(|e| e.for_kind("podcast"))
}

fn podcast_inner(node: &Value) -> Result<Podcast> {
    Ok(Podcast {
        name: selectors::select_string(node, TWO_ROW_TITLE)?,
        id: selectors::select_string(node, TWO_ROW_OVERLAY_PLAYLIST_ID)?,
        host: selectors::select_named_entity(
            node,
            &format!("{TWO_ROW_SUBTITLE_RUNS}[0].text"),
            &format!("{TWO_ROW_SUBTITLE_RUNS}[0].navigationEndpoint.browseEndpoint.browseId"),
        )?,
        thumbnails: selectors::select_thumbnails(node, TWO_ROW_THUMBNAILS),
    })
}

/// Assemble a podcast episode from a multi-row list item.
///
/// The release date is often relative ("3 days ago"); `now` is the reference
/// it resolves against, supplied by the caller so assembly stays
/// deterministic.
pub fn assemble_episode(node: &Value, now: DateTime<Utc>) -> Result<Episode> {
    episode_inner(node, now).map_err(|e| e.for_kind("episode"))
}

fn episode_inner(node: &Value, now: DateTime<Utc>) -> Result<Episode> {
    let runs = coerce::as_array(select(node, MULTI_ROW_SUBTITLE_RUNS)?, MULTI_ROW_SUBTITLE_RUNS)?;
    let date_path = format!(
        "{MULTI_ROW_SUBTITLE_RUNS}[{}].text",
        last_index(runs, MULTI_ROW_SUBTITLE_RUNS)?
    );
    let date_text = selectors::select_string(node, &date_path)?;

    // An absent like button means likes are allowed; a present node of the
    // wrong kind is schema drift, not a default.
    let is_likes_allowed = match crate::navigate::select_optional(node, MULTI_ROW_LIKES_ALLOWED) {
        Some(value) => coerce::as_bool(value, MULTI_ROW_LIKES_ALLOWED)?,
        None => true,
    };

    Ok(Episode {
        name: selectors::select_string(node, MULTI_ROW_TITLE)?,
        id: selectors::select_string(node, MULTI_ROW_VIDEO_ID)?,
        podcast: selectors::select_named_entity(
            node,
            &format!("{MULTI_ROW_SUBTITLE_RUNS}[0].text"),
            &format!("{MULTI_ROW_SUBTITLE_RUNS}[0].navigationEndpoint.browseEndpoint.browseId"),
        )?,
        released_at: coerce::parse_relative_date(&date_text, now, &date_path)?,
        is_likes_allowed,
        thumbnails: selectors::select_thumbnails(node, MULTI_ROW_THUMBNAILS),
    })
}

/// Assemble one track row of an album's track list.
pub fn assemble_album_song(node: &Value) -> Result<AlbumSong> {
    album_song_inner(node).map_err(|e| e.for_kind("album song"))
}

fn album_song_inner(node: &Value) -> Result<AlbumSong> {
    Ok(AlbumSong {
        name: selectors::select_string(node, &flex_run_text(0))?,
        id: selectors::select_string_optional(
            node,
            "musicResponsiveListItemRenderer.flexColumns[0].musicResponsiveListItemFlexColumnRenderer.text.runs[0].navigationEndpoint.watchEndpoint.videoId",
        ),
        is_explicit: selectors::select_is_explicit(node, LIST_BADGES),
        plays_info: selectors::select_string_optional(node, &flex_run_text(2)),
        duration: select_duration_with_fallback(node)?,
        song_number: selectors::select_int_optional(
            node,
            "musicResponsiveListItemRenderer.index.runs[0].text",
        )
        .map(|n| n as u64),
    })
}

/// Assemble every track of an album response.
///
/// The track shelf's enclosing renderer varies between response variants,
/// so it is located by deep key search rather than a fixed path.
pub fn assemble_album_songs(node: &Value) -> Result<Vec<AlbumSong>> {
    let shelf = find_all_by_key(node, "musicShelfRenderer")
        .into_iter()
        .next()
        .ok_or_else(|| YtMusicError::PathNotFound {
            path: "musicShelfRenderer".to_string(),
        })?;
    assemble_all(shelf, "contents", assemble_album_song)
}

/// Assemble one track row of a community playlist.
///
/// The album column is always the last flex column, but how many columns
/// precede it varies per playlist, so its index is computed from the column
/// count before any path is built.
pub fn assemble_playlist_song(node: &Value) -> Result<PlaylistSong> {
    playlist_song_inner(node).map_err(|e| e.for_kind("playlist song"))
}

fn playlist_song_inner(node: &Value) -> Result<PlaylistSong> {
    const FLEX_COLUMNS: &str = "musicResponsiveListItemRenderer.flexColumns";
    let columns = coerce::as_array(select(node, FLEX_COLUMNS)?, FLEX_COLUMNS)?;
    let album_index = last_index(columns, FLEX_COLUMNS)?;

    let duration_text = selectors::select_string_optional(node, LIST_FIXED_DURATION)
        .or_else(|| selectors::select_string_optional(node, &flex_run_text(2)))
        .ok_or_else(|| YtMusicError::PathNotFound {
            path: LIST_FIXED_DURATION.to_string(),
        })?;

    Ok(PlaylistSong {
        name: selectors::select_string(node, &flex_run_text(0))?,
        id: selectors::select_string_optional(
            node,
            "musicResponsiveListItemRenderer.flexColumns[0].musicResponsiveListItemFlexColumnRenderer.text.runs[0].navigationEndpoint.watchEndpoint.videoId",
        ),
        artists: selectors::select_artists(node, &flex_runs(1), 0, 0)?,
        album: selectors::select_named_entity_optional(
            node,
            &flex_run_text(album_index),
            &format!(
                "musicResponsiveListItemRenderer.flexColumns[{album_index}].musicResponsiveListItemFlexColumnRenderer.text.runs[0].navigationEndpoint.browseEndpoint.browseId"
            ),
        ),
        is_explicit: selectors::select_is_explicit(node, LIST_BADGES),
        duration: coerce::parse_duration(&duration_text, LIST_FIXED_DURATION)?,
        thumbnails: selectors::select_thumbnails(node, LIST_THUMBNAILS),
    })
}

/// Assemble one track row of a watch-queue panel ("next" response).
///
/// The byline mixes artist runs, separators, the album, and a trailing year;
/// the album always sits three runs from the end.
pub fn assemble_playlist_panel_song(node: &Value) -> Result<PlaylistSong> {
    playlist_panel_song_inner(node).map_err(|e| e.for_kind("playlist song"))
}

fn playlist_panel_song_inner(node: &Value) -> Result<PlaylistSong> {
    let runs = coerce::as_array(select(node, PANEL_BYLINE_RUNS)?, PANEL_BYLINE_RUNS)?;

    let album = match runs.len().checked_sub(3) {
        Some(album_index) => selectors::select_string_optional(
            node,
            &format!("{PANEL_BYLINE_RUNS}[{album_index}].navigationEndpoint.browseEndpoint.browseId"),
        )
        .map(|album_id| {
            selectors::select_string(node, &format!("{PANEL_BYLINE_RUNS}[{album_index}].text"))
                .map(|name| NamedEntity::new(name, Some(album_id)))
        })
        .transpose()?,
        None => None,
    };

    let duration_text = selectors::select_string(node, PANEL_DURATION)?;

    Ok(PlaylistSong {
        name: selectors::select_string(node, PANEL_TITLE)?,
        id: selectors::select_string_optional(node, PANEL_VIDEO_ID),
        artists: selectors::select_artists(node, PANEL_BYLINE_RUNS, 0, 3)?,
        album,
        is_explicit: selectors::select_is_explicit(node, PANEL_BADGES),
        duration: coerce::parse_duration(&duration_text, PANEL_DURATION)?,
        thumbnails: selectors::select_thumbnails(node, PANEL_THUMBNAILS),
    })
}
