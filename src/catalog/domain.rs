//! Internal domain models for catalog search results.
//!
//! These types are OUR types - they don't change when Discogs or MusicBrainz
//! change their responses. Every provider response gets converted into these
//! types by the provider adapters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Largest page size any provider accepts (Discogs caps `per_page` at 100).
pub const MAX_PER_PAGE: u32 = 100;

/// Page size used when the caller doesn't ask for one.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Release type sent to the provider for free-text searches.
pub const DEFAULT_RELEASE_TYPE: &str = "release";

/// External catalog a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    #[default]
    Discogs,
    MusicBrainz,
}

impl CatalogSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discogs => "discogs",
            Self::MusicBrainz => "musicbrainz",
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discogs" => Ok(Self::Discogs),
            "musicbrainz" | "mb" => Ok(Self::MusicBrainz),
            other => Err(format!("unknown catalog provider: {other}")),
        }
    }
}

/// Identity of a release across providers.
///
/// Provider ids are only unique within their own catalog, so anything that
/// needs to tell two candidates apart must key on both halves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseKey {
    pub source: CatalogSource,
    pub id: String,
}

/// A provider search result that isn't in anyone's collection yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseCandidate {
    /// Provider-scoped identifier (always a string, even when the provider sends a number)
    pub id: String,
    pub source: CatalogSource,
    pub title: String,
    pub artist: String,
    pub year: Option<i32>,
    /// Cover image URL, never a provider placeholder
    pub cover_image: Option<String>,
    /// Formats joined with ", " (e.g. "Vinyl, LP, Album")
    pub format: Option<String>,
    pub label: Option<String>,
    pub country: Option<String>,
    pub barcode: Option<String>,
    /// Release page on the provider's website
    pub url: Option<String>,
}

impl ReleaseCandidate {
    pub fn key(&self) -> ReleaseKey {
        ReleaseKey {
            source: self.source,
            id: self.id.clone(),
        }
    }
}

/// A single entry of a release tracklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Side/track position as printed by the provider ("A1", "1.3", ...)
    pub position: String,
    pub title: String,
    /// Duration formatted as M:SS when known
    pub duration: Option<String>,
}

/// Full release information, fetched by provider id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDetail {
    #[serde(flatten)]
    pub release: ReleaseCandidate,
    pub images: Vec<String>,
    pub genres: Vec<String>,
    pub styles: Vec<String>,
    pub tracks: Vec<Track>,
    pub notes: Option<String>,
}

/// Pagination cursor as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub pages: u32,
    pub total: u64,
}

/// One page of normalized search results.
///
/// `pagination` is `None` when the provider couldn't be reached.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchPage {
    pub results: Vec<ReleaseCandidate>,
    pub pagination: Option<Pagination>,
}

impl SearchPage {
    /// The result of a search whose provider call failed
    pub fn empty() -> Self {
        Self::default()
    }
}

/// What a search is keyed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchKind {
    /// Free-text query plus provider release type ("release", "master", ...)
    Text { query: String, release_type: String },
    Barcode(String),
}

/// A search request as sent to a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub kind: SearchKind,
    pub page: u32,
    pub per_page: u32,
}

impl SearchQuery {
    pub fn text(
        query: impl Into<String>,
        release_type: impl Into<String>,
        page: u32,
        per_page: u32,
    ) -> Self {
        Self {
            kind: SearchKind::Text {
                query: query.into(),
                release_type: release_type.into(),
            },
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn barcode(barcode: impl Into<String>, page: u32, per_page: u32) -> Self {
        Self {
            kind: SearchKind::Barcode(barcode.into()),
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Zero-based index of the first result on the requested page
    pub fn offset(&self) -> u32 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// Errors that can occur while talking to a catalog
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Catalog rejected our credentials")]
    Unauthorized,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API request failed: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl CatalogError {
    /// True when the provider itself failed us (as opposed to a bad request or a missing release)
    pub fn is_upstream_unavailable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited
                | Self::Unauthorized
                | Self::Network(_)
                | Self::Api { .. }
                | Self::Parse(_)
                | Self::Client(_)
        )
    }
}
