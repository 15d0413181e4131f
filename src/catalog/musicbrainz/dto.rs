//! MusicBrainz API Data Transfer Objects
//!
//! These types match EXACTLY what the MusicBrainz API returns.
//! DO NOT use these types outside the catalog module - convert to domain types.
//!
//! API Reference: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! We use the /release endpoint both for Lucene searches (`?query=`) and for
//! lookups by MBID with `inc=artists+labels+recordings+release-groups`.
//! Search hits and lookups share the same release shape; lookups just fill in
//! more of it (track listings).

use serde::{Deserialize, Serialize};

use crate::catalog::de;

/// Release search response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    /// Total number of matches
    #[serde(default, deserialize_with = "de::count")]
    pub count: u64,
    /// Index of the first returned match
    #[serde(default, deserialize_with = "de::count")]
    pub offset: u64,
    #[serde(default, deserialize_with = "de::null_default")]
    pub releases: Vec<Release>,
}

/// Release (search hit or full lookup)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Release {
    /// MusicBrainz release ID
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Release status (Official, Bootleg, etc.)
    pub status: Option<String>,
    /// Release date (YYYY, YYYY-MM, or YYYY-MM-DD)
    pub date: Option<String>,
    /// Country code
    pub country: Option<String>,
    /// Barcode, empty string when the release has none
    pub barcode: Option<String>,
    /// Search relevance (searches only)
    pub score: Option<u32>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub artist_credit: Vec<ArtistCredit>,
    pub release_group: Option<ReleaseGroup>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub label_info: Vec<LabelInfo>,
    /// Media (discs/sides) in this release
    #[serde(default, deserialize_with = "de::null_default")]
    pub media: Vec<Medium>,
}

/// Artist credit (can be multiple for collaborations)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistCredit {
    /// How this artist is credited (may differ from official name)
    pub name: Option<String>,
    /// Join phrase (e.g., " & ", " feat. ")
    pub joinphrase: Option<String>,
    pub artist: Option<Artist>,
}

/// Artist info
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Artist {
    pub id: String,
    pub name: String,
    /// Sort name (e.g., "Beatles, The")
    pub sort_name: Option<String>,
}

/// Release group (e.g., "Abbey Road" across all editions)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReleaseGroup {
    pub id: String,
    pub title: Option<String>,
    /// Primary type (Album, Single, EP, etc.)
    pub primary_type: Option<String>,
    /// First release date
    pub first_release_date: Option<String>,
}

/// Label and catalog number
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LabelInfo {
    pub catalog_number: Option<String>,
    pub label: Option<Label>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Label {
    pub id: Option<String>,
    pub name: String,
}

/// Medium (disc or record) within a release
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Medium {
    pub position: Option<u32>,
    /// Format (CD, 12" Vinyl, Digital Media, etc.)
    pub format: Option<String>,
    pub track_count: Option<u32>,
    /// Tracks on this medium (lookups with `inc=recordings` only)
    #[serde(default, deserialize_with = "de::null_default")]
    pub tracks: Vec<Track>,
}

/// Track on a medium
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    pub position: Option<u32>,
    /// Track number as printed (may be "A1")
    pub number: Option<String>,
    pub title: Option<String>,
    /// Track length in milliseconds
    pub length: Option<u64>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
