//! Error types for the YouTube Music API.

use thiserror::Error;

/// Main error type for all YouTube Music operations.
#[derive(Debug, Error)]
pub enum YtMusicError {
    /// A required JSON path was absent from the response.
    ///
    /// The carried path is the exact expression that failed to resolve, so a
    /// captured raw response can be diagnosed without re-deriving which of
    /// many nested lookups broke.
    #[error("Path not found: {path}")]
    PathNotFound {
        /// The path expression that did not resolve.
        path: String,
    },

    /// A node was present but of the wrong JSON kind. Signals schema drift
    /// upstream.
    #[error("Type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        /// The path expression that resolved to the offending node.
        path: String,
        /// The JSON kind the caller asked for.
        expected: &'static str,
        /// The JSON kind actually present.
        found: &'static str,
    },

    /// A stream descriptor carried a MIME major type other than audio/video.
    #[error("Unsupported stream kind: {0}")]
    UnsupportedStreamKind(String),

    /// Entity assembly failed; wraps the underlying navigation or coercion
    /// error together with the entity kind under assembly.
    #[error("Failed to assemble {kind}: {source}")]
    Assembly {
        /// The entity kind that was being assembled.
        kind: &'static str,
        /// The navigation/coercion error that broke the assembly.
        #[source]
        source: Box<YtMusicError>,
    },

    /// Invalid or missing authentication cookies.
    #[error("Bad credentials: {0}")]
    BadCredentials(String),

    /// HTTP request failed.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic API error with message.
    #[error("API error: {0}")]
    ApiError(String),
}

impl YtMusicError {
    /// Wrap this error in an [`YtMusicError::Assembly`] naming the entity kind.
    pub fn for_kind(self, kind: &'static str) -> Self {
        YtMusicError::Assembly {
            kind,
            source: Box::new(self),
        }
    }
}

/// Result type alias for YouTube Music operations.
pub type Result<T> = std::result::Result<T, YtMusicError>;
