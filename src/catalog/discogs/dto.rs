//! Discogs API Data Transfer Objects
//!
//! These types match what the Discogs database API returns.
//! DO NOT use these types outside the catalog module - convert to domain types.
//!
//! API Reference: https://www.discogs.com/developers
//!
//! Endpoints used:
//! - `/database/search` for text and barcode searches
//! - `/releases/{id}` for full release details

use serde::{Deserialize, Serialize};

use crate::catalog::de;

/// Search response envelope
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    pub pagination: Option<Pagination>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub results: Vec<SearchItem>,
}

/// Pagination block of a search response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Pagination {
    #[serde(default, deserialize_with = "de::count")]
    pub page: u64,
    #[serde(default, deserialize_with = "de::count")]
    pub pages: u64,
    #[serde(default, deserialize_with = "de::count")]
    pub per_page: u64,
    /// Total number of matching entries
    #[serde(default, deserialize_with = "de::count")]
    pub items: u64,
}

/// One search hit. Discogs packs "Artist - Title" into `title`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchItem {
    #[serde(deserialize_with = "de::id_string")]
    pub id: String,
    /// Result type (release, master, artist, label)
    #[serde(rename = "type")]
    pub result_type: Option<String>,
    #[serde(default)]
    pub title: String,
    /// Year as a string ("1973")
    #[serde(default, deserialize_with = "de::opt_year")]
    pub year: Option<i32>,
    pub country: Option<String>,
    /// Format names and descriptions ("Vinyl", "LP", "Album")
    #[serde(default, deserialize_with = "de::null_default")]
    pub format: Vec<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub label: Vec<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub barcode: Vec<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub genre: Vec<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub style: Vec<String>,
    /// Full-size cover (may be the spacer.gif placeholder)
    pub cover_image: Option<String>,
    pub thumb: Option<String>,
    pub resource_url: Option<String>,
    /// Site path ("/release/249504-Pink-Floyd-...")
    pub uri: Option<String>,
}

/// Full release
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Release {
    #[serde(deserialize_with = "de::id_string")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Integer year, 0 when unknown
    #[serde(default, deserialize_with = "de::opt_year")]
    pub year: Option<i32>,
    pub country: Option<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub artists: Vec<ArtistCredit>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub formats: Vec<Format>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub labels: Vec<Label>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub identifiers: Vec<Identifier>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub styles: Vec<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub tracklist: Vec<TrackEntry>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub images: Vec<Image>,
    pub notes: Option<String>,
    /// Full site URL
    pub uri: Option<String>,
}

/// Artist credit on a release
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistCredit {
    pub name: String,
    /// Artist name variation used on this release
    pub anv: Option<String>,
    pub join: Option<String>,
}

/// Physical format ("Vinyl" with descriptions "LP", "Album")
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Format {
    pub name: String,
    pub qty: Option<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub descriptions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Label {
    pub name: String,
    pub catno: Option<String>,
}

/// Identifier such as a barcode or matrix number
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub identifier_type: String,
    pub value: Option<String>,
}

/// Tracklist entry (also used for headings and index tracks)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackEntry {
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub title: String,
    /// Already formatted ("6:23"), empty when unknown
    pub duration: Option<String>,
    /// "track", "heading" or "index"
    #[serde(rename = "type_")]
    pub entry_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Image {
    /// "primary" or "secondary"
    #[serde(rename = "type")]
    pub image_type: Option<String>,
    pub uri: Option<String>,
    pub uri150: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "pagination": {"page": 1, "pages": 5, "per_page": 20, "items": 97, "urls": {}},
            "results": [{
                "id": 249504,
                "type": "release",
                "title": "Pink Floyd - The Dark Side Of The Moon",
                "year": "1973",
                "country": "UK",
                "format": ["Vinyl", "LP", "Album"],
                "label": ["Harvest", "EMI"],
                "barcode": ["5099902987766", "SHVL 804"],
                "genre": ["Rock"],
                "style": ["Prog Rock"],
                "cover_image": "https://i.discogs.com/full.jpg",
                "thumb": "https://i.discogs.com/thumb.jpg",
                "resource_url": "https://api.discogs.com/releases/249504",
                "uri": "/release/249504-Pink-Floyd-The-Dark-Side-Of-The-Moon"
            }]
        }"#;

        let response: SearchResponse =
            serde_json::from_str(json).expect("Should parse search response");

        let pagination = response.pagination.expect("pagination present");
        assert_eq!(pagination.items, 97);
        assert_eq!(pagination.pages, 5);

        let item = &response.results[0];
        assert_eq!(item.id, "249504");
        assert_eq!(item.year, Some(1973));
        assert_eq!(item.format, vec!["Vinyl", "LP", "Album"]);
        assert_eq!(item.barcode[0], "5099902987766");
    }

    #[test]
    fn test_parse_sparse_search_item() {
        let json = r#"{"results": [{"id": 1, "title": "Untitled", "format": null, "year": null}]}"#;

        let response: SearchResponse = serde_json::from_str(json).expect("Should parse sparse item");

        assert!(response.pagination.is_none());
        let item = &response.results[0];
        assert!(item.format.is_empty());
        assert!(item.year.is_none());
        assert!(item.cover_image.is_none());
    }

    #[test]
    fn test_parse_release() {
        let json = r#"{
            "id": 249504,
            "title": "The Dark Side Of The Moon",
            "year": 1973,
            "country": "UK",
            "artists": [{"name": "Pink Floyd", "anv": "", "join": "", "id": 45467}],
            "formats": [{"name": "Vinyl", "qty": "1", "descriptions": ["LP", "Album"]}],
            "labels": [{"name": "Harvest", "catno": "SHVL 804"}],
            "identifiers": [
                {"type": "Matrix / Runout", "value": "SHVL 804 A-3"},
                {"type": "Barcode", "value": "5099902987766"}
            ],
            "genres": ["Rock"],
            "styles": ["Prog Rock", "Psychedelic Rock"],
            "tracklist": [
                {"position": "", "type_": "heading", "title": "Side A", "duration": ""},
                {"position": "A1", "type_": "track", "title": "Speak To Me", "duration": "1:30"}
            ],
            "images": [
                {"type": "secondary", "uri": "https://i.discogs.com/back.jpg", "uri150": "https://i.discogs.com/back-150.jpg"},
                {"type": "primary", "uri": "https://i.discogs.com/front.jpg", "uri150": "https://i.discogs.com/front-150.jpg"}
            ],
            "notes": "Gatefold sleeve.",
            "uri": "https://www.discogs.com/release/249504"
        }"#;

        let release: Release = serde_json::from_str(json).expect("Should parse release");

        assert_eq!(release.id, "249504");
        assert_eq!(release.year, Some(1973));
        assert_eq!(release.artists[0].name, "Pink Floyd");
        assert_eq!(release.formats[0].descriptions, vec!["LP", "Album"]);
        assert_eq!(release.identifiers[1].identifier_type, "Barcode");
        assert_eq!(release.tracklist[0].entry_type.as_deref(), Some("heading"));
        assert_eq!(release.images[1].image_type.as_deref(), Some("primary"));
    }

    #[test]
    fn test_parse_release_with_unknown_year() {
        let json = r#"{"id": "12", "title": "Bootleg", "year": 0}"#;
        let release: Release = serde_json::from_str(json).expect("Should parse minimal release");
        assert!(release.year.is_none());
        assert!(release.tracklist.is_empty());
    }
}
