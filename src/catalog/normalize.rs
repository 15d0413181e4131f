//! Result normalizer: provider records in, canonical candidates out.
//!
//! Provider responses arrive as tagged variants (one per provider DTO) and
//! each variant has exactly one adapter function. The rules shared by every
//! provider live here: the format filter, placeholder-aware cover selection,
//! artist-from-title extraction and duration formatting.

use super::discogs;
use super::domain::{Pagination, ReleaseCandidate, ReleaseDetail};
use super::musicbrainz;

/// Discogs serves this image when a release has no artwork
pub const PLACEHOLDER_IMAGE: &str = "spacer.gif";

/// Separator between artist and title in Discogs search titles
pub const TITLE_SEPARATOR: &str = " - ";

/// Artist used for search results whose title carries no artist
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Artist used for detail records without artist credits
pub const UNKNOWN_DETAIL_ARTIST: &str = "Unknown";

/// Format keywords that mark a release as vinyl
pub const VINYL_KEYWORDS: [&str; 6] = ["vinyl", "lp", "ep", "12\"", "7\"", "10\""];

/// One raw search entry, tagged with the provider it came from
#[derive(Debug, Clone)]
pub enum RawSearchItem {
    Discogs(discogs::dto::SearchItem),
    MusicBrainz(musicbrainz::dto::Release),
}

/// A raw page of search entries plus the provider's pagination
#[derive(Debug, Clone, Default)]
pub struct RawSearchPage {
    pub items: Vec<RawSearchItem>,
    pub pagination: Option<Pagination>,
}

/// A raw release lookup, tagged with the provider it came from
#[derive(Debug, Clone)]
pub enum RawRelease {
    Discogs(discogs::dto::Release),
    MusicBrainz(musicbrainz::dto::Release),
}

/// Which physical formats survive a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatFilter {
    /// Keep everything
    Any,
    /// Keep entries whose joined, lowercased format list contains one of these
    Keywords(Vec<String>),
}

impl FormatFilter {
    /// The vinyl-only filter used by default
    pub fn vinyl() -> Self {
        Self::keywords(VINYL_KEYWORDS)
    }

    pub fn keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Keywords(
            keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        )
    }

    /// Check a provider's format list against the filter
    pub fn accepts<S: AsRef<str>>(&self, formats: &[S]) -> bool {
        match self {
            Self::Any => true,
            Self::Keywords(keywords) => {
                let joined = formats
                    .iter()
                    .map(AsRef::as_ref)
                    .collect::<Vec<_>>()
                    .join(" ")
                    .to_lowercase();
                keywords.iter().any(|k| joined.contains(k.as_str()))
            }
        }
    }
}

impl Default for FormatFilter {
    fn default() -> Self {
        Self::vinyl()
    }
}

/// Normalize one search entry, or `None` if the filter rejects it
pub fn candidate(item: RawSearchItem, filter: &FormatFilter) -> Option<ReleaseCandidate> {
    match item {
        RawSearchItem::Discogs(item) => discogs::adapter::to_candidate(item, filter),
        RawSearchItem::MusicBrainz(release) => musicbrainz::adapter::to_candidate(release, filter),
    }
}

/// Normalize a full release lookup
pub fn detail(release: RawRelease) -> ReleaseDetail {
    match release {
        RawRelease::Discogs(release) => discogs::adapter::to_detail(release),
        RawRelease::MusicBrainz(release) => musicbrainz::adapter::to_detail(release),
    }
}

/// A usable image URL: non-empty and not the placeholder
pub fn usable_image(url: Option<&str>) -> Option<String> {
    url.map(str::trim)
        .filter(|u| !u.is_empty() && !u.contains(PLACEHOLDER_IMAGE))
        .map(str::to_string)
}

/// Pick the full-size cover, falling back to the thumbnail
pub fn resolve_cover(full: Option<&str>, thumb: Option<&str>) -> Option<String> {
    usable_image(full).or_else(|| usable_image(thumb))
}

/// Take the artist from a "Artist - Title" search title
pub fn artist_from_title(title: &str) -> String {
    let mut parts = title.split(TITLE_SEPARATOR);
    match (parts.next(), parts.next()) {
        (Some(artist), Some(_)) => artist.to_string(),
        _ => UNKNOWN_ARTIST.to_string(),
    }
}

/// Format a millisecond duration as M:SS
pub fn format_duration_ms(millis: u64) -> String {
    let total_secs = millis / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Join the non-blank values with ", ", or `None` if there are none
pub fn join_values<I, S>(values: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parts: Vec<String> = values
        .into_iter()
        .map(|v| v.as_ref().trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}

/// Treat blank strings as missing
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
