//! Client for the internal music.youtube.com API.
//!
//! The service exposes no documented API; every response is a loosely
//! structured renderer tree. This client owns the HTTP side only — request
//! bodies, cookie authentication, status validation — and hands each parsed
//! tree to the assemblers and the stream classifier, which are pure and
//! never observe transport errors.

use chrono::Utc;
use futures_util::StreamExt;
use reqwest::{cookie::Jar, Client, Url};
use serde_json::{json, Value};
use sha1::{Digest, Sha1};
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error};

use crate::assemblers;
use crate::error::{Result, YtMusicError};
use crate::models::{
    Album, Artist, CommunityPlaylist, Episode, MediaStream, Podcast, Song, Subscription,
};
use crate::navigate::find_all_by_key;
use crate::streams;

/// Base URL for the internal API.
const API_BASE_URL: &str = "https://music.youtube.com/youtubei/v1/";

/// Origin the cookie hash is bound to.
const ORIGIN: &str = "https://music.youtube.com";

/// Innertube client identity sent with every request body.
const CLIENT_NAME: &str = "WEB_REMIX";
const CLIENT_VERSION: &str = "1.20240918.01.00";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36";

/// Library surface browse ids.
const BROWSE_LIBRARY_SONGS: &str = "FEmusic_liked_videos";
const BROWSE_LIBRARY_ALBUMS: &str = "FEmusic_liked_albums";
const BROWSE_LIBRARY_ARTISTS: &str = "FEmusic_library_corpus_track_artists";
const BROWSE_LIBRARY_SUBSCRIPTIONS: &str = "FEmusic_library_corpus_artists";
const BROWSE_LIBRARY_PLAYLISTS: &str = "FEmusic_liked_playlists";
const BROWSE_LIBRARY_PODCASTS: &str = "FEmusic_library_non_music_audio_list";

/// Compute the cookie authorization digest: hex SHA-1 over
/// `"{timestamp} {sapisid} {origin}"`, prefixed scheme and timestamp.
fn sapisid_hash(sapisid: &str, origin: &str, timestamp: i64) -> String {
    let mut hasher = Sha1::new();
    hasher.update(format!("{timestamp} {sapisid} {origin}").as_bytes());
    format!("SAPISIDHASH {timestamp}_{}", hex::encode(hasher.finalize()))
}

/// Extract the `SAPISID` value from a `name=value; name=value` cookie string.
fn extract_sapisid(cookies: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == "SAPISID" || name == "__Secure-3PAPISID").then(|| value.to_string())
    })
}

/// Client for the internal music.youtube.com API.
///
/// Unauthenticated clients can fetch player data; the library surfaces
/// require session cookies copied from a logged-in browser.
///
/// # Example
///
/// ```rust,no_run
/// use ytmusic::YtMusicApi;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let api = YtMusicApi::with_cookies("US", "SAPISID=abc; ...")?;
///     for song in api.get_library_songs().await? {
///         println!("{} - {}", song.artists_string(", "), song.name);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct YtMusicApi {
    client: Client,
    geographical_location: String,
    sapisid: Option<String>,
}

impl YtMusicApi {
    /// Create an unauthenticated client.
    ///
    /// `geographical_location` is the two-letter region code sent with every
    /// request; it affects which localized strings the service returns.
    pub fn new(geographical_location: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| YtMusicError::ApiError(format!("Failed to create client: {e}")))?;

        Ok(Self {
            client,
            geographical_location: geographical_location.to_string(),
            sapisid: None,
        })
    }

    /// Create an authenticated client from a browser cookie string.
    ///
    /// # Errors
    ///
    /// Returns `BadCredentials` if the cookie string carries no `SAPISID`,
    /// without which the service rejects library requests.
    pub fn with_cookies(geographical_location: &str, cookies: &str) -> Result<Self> {
        let sapisid = extract_sapisid(cookies).ok_or_else(|| {
            YtMusicError::BadCredentials("cookie string contains no SAPISID".to_string())
        })?;

        let jar = Arc::new(Jar::default());
        let url = ORIGIN
            .parse::<Url>()
            .map_err(|e| YtMusicError::ApiError(format!("Invalid origin url: {e}")))?;
        for pair in cookies.split(';') {
            jar.add_cookie_str(pair.trim(), &url);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_provider(jar)
            .build()
            .map_err(|e| YtMusicError::ApiError(format!("Failed to create client: {e}")))?;

        Ok(Self {
            client,
            geographical_location: geographical_location.to_string(),
            sapisid: Some(sapisid),
        })
    }

    /// Whether this client carries session cookies.
    pub fn is_authenticated(&self) -> bool {
        self.sapisid.is_some()
    }

    /// The innertube context object merged into every request body.
    fn context(&self) -> Value {
        json!({
            "client": {
                "clientName": CLIENT_NAME,
                "clientVersion": CLIENT_VERSION,
                "gl": self.geographical_location,
                "hl": "en"
            }
        })
    }

    /// POST a body to an internal endpoint and parse the response tree.
    async fn post(&self, endpoint: &str, mut body: Value) -> Result<Value> {
        let url = format!("{API_BASE_URL}{endpoint}");
        debug!("POST {}", url);

        if let Some(obj) = body.as_object_mut() {
            obj.insert("context".to_string(), self.context());
        }

        let mut request = self.client.post(&url).json(&body);
        if let Some(sapisid) = &self.sapisid {
            let timestamp = Utc::now().timestamp();
            request = request
                .header("Authorization", sapisid_hash(sapisid, ORIGIN, timestamp))
                .header("Origin", ORIGIN)
                .header("X-Origin", ORIGIN);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!("HTTP request failed. Status: {}", status);
            return Err(YtMusicError::ApiError(format!(
                "HTTP request failed (status {status}): {text}"
            )));
        }

        let tree: Value = serde_json::from_str(&text)?;
        if let Some(api_error) = tree.get("error") {
            let message = api_error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error");
            error!("API error: {}", message);
            return Err(YtMusicError::ApiError(message.to_string()));
        }

        Ok(tree)
    }

    /// Fetch a browse surface by its browse id.
    pub async fn browse(&self, browse_id: &str) -> Result<Value> {
        self.post("browse", json!({ "browseId": browse_id })).await
    }

    /// Fetch a watch-queue ("next") response.
    pub async fn next(&self, body: Value) -> Result<Value> {
        self.post("next", body).await
    }

    /// Fetch player data for a video.
    pub async fn player(&self, video_id: &str) -> Result<Value> {
        self.post("player", json!({ "videoId": video_id })).await
    }

    /// The first list shelf of a browse response. Its enclosing renderer
    /// varies per surface, so it is located by deep key search.
    fn shelf<'a>(response: &'a Value, renderer: &str) -> Result<&'a Value> {
        find_all_by_key(response, renderer)
            .into_iter()
            .next()
            .ok_or_else(|| YtMusicError::PathNotFound {
                path: renderer.to_string(),
            })
    }

    /// Get all songs in the user's library.
    pub async fn get_library_songs(&self) -> Result<Vec<Song>> {
        let response = self.browse(BROWSE_LIBRARY_SONGS).await?;
        let shelf = Self::shelf(&response, "musicShelfRenderer")?;
        assemblers::assemble_all(shelf, "contents", assemblers::assemble_song)
    }

    /// Get all albums in the user's library.
    pub async fn get_library_albums(&self) -> Result<Vec<Album>> {
        let response = self.browse(BROWSE_LIBRARY_ALBUMS).await?;
        let grid = Self::shelf(&response, "gridRenderer")?;
        assemblers::assemble_all(grid, "items", assemblers::assemble_album)
    }

    /// Get all artists with songs in the user's library.
    pub async fn get_library_artists(&self) -> Result<Vec<Artist>> {
        let response = self.browse(BROWSE_LIBRARY_ARTISTS).await?;
        let shelf = Self::shelf(&response, "musicShelfRenderer")?;
        assemblers::assemble_all(shelf, "contents", assemblers::assemble_artist)
    }

    /// Get all channels the user is subscribed to.
    pub async fn get_library_subscriptions(&self) -> Result<Vec<Subscription>> {
        let response = self.browse(BROWSE_LIBRARY_SUBSCRIPTIONS).await?;
        let shelf = Self::shelf(&response, "musicShelfRenderer")?;
        assemblers::assemble_all(shelf, "contents", assemblers::assemble_subscription)
    }

    /// Get all community playlists saved to the user's library.
    pub async fn get_library_playlists(&self) -> Result<Vec<CommunityPlaylist>> {
        let response = self.browse(BROWSE_LIBRARY_PLAYLISTS).await?;
        let grid = Self::shelf(&response, "gridRenderer")?;
        assemblers::assemble_all(grid, "items", assemblers::assemble_community_playlist)
    }

    /// Get all podcasts saved to the user's library.
    pub async fn get_library_podcasts(&self) -> Result<Vec<Podcast>> {
        let response = self.browse(BROWSE_LIBRARY_PODCASTS).await?;
        let grid = Self::shelf(&response, "gridRenderer")?;
        assemblers::assemble_all(grid, "items", assemblers::assemble_podcast)
    }

    /// Get the episodes of a podcast.
    ///
    /// Relative release dates in the response resolve against the wall
    /// clock here, at the transport boundary; assembly itself takes the
    /// reference time as an argument.
    pub async fn get_podcast_episodes(&self, podcast_browse_id: &str) -> Result<Vec<Episode>> {
        let response = self.browse(podcast_browse_id).await?;
        let now = Utc::now();
        let shelf = Self::shelf(&response, "musicShelfRenderer")?;
        assemblers::assemble_all(shelf, "contents", |item| {
            assemblers::assemble_episode(item, now)
        })
    }

    /// Get the classified media streams of a video.
    pub async fn get_streaming_data(&self, video_id: &str) -> Result<Vec<MediaStream>> {
        let response = self.player(video_id).await?;
        streams::classify_streams(&response, Utc::now())
    }

    /// Fetch thumbnail image bytes.
    pub async fn get_thumbnail(&self, url: &str) -> Result<bytes::Bytes> {
        let response = self.client.get(url).send().await?;
        Ok(response.bytes().await?)
    }

    /// Download a media stream to a file.
    pub async fn download_stream(&self, url: &str, path: &Path) -> Result<()> {
        debug!("GET {} -> {}", url, path.display());

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            error!("Stream download failed. Status: {}", status);
            return Err(YtMusicError::ApiError(format!(
                "Stream download failed (status {status})"
            )));
        }

        let mut file = tokio::fs::File::create(path).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;

        Ok(())
    }
}
