//! Adapter layer: Convert Discogs DTOs to domain models
//!
//! This is the ONLY place where Discogs DTO types are converted to domain types.

use super::dto;
use crate::catalog::domain::{CatalogSource, Pagination, ReleaseCandidate, ReleaseDetail, Track};
use crate::catalog::normalize::{self, FormatFilter};

/// Base of Discogs website links (search results only carry the path)
const SITE_URL: &str = "https://www.discogs.com";

/// Convert a search hit, or `None` if its formats don't pass the filter
pub fn to_candidate(item: dto::SearchItem, filter: &FormatFilter) -> Option<ReleaseCandidate> {
    if !filter.accepts(&item.format) {
        tracing::debug!(
            id = %item.id,
            title = %item.title,
            formats = ?item.format,
            "Dropping Discogs result: format rejected"
        );
        return None;
    }

    let cover_image =
        normalize::resolve_cover(item.cover_image.as_deref(), item.thumb.as_deref());
    let artist = normalize::artist_from_title(&item.title);

    Some(ReleaseCandidate {
        id: item.id,
        source: CatalogSource::Discogs,
        artist,
        title: item.title,
        year: item.year,
        cover_image,
        format: normalize::join_values(&item.format),
        label: normalize::join_values(&item.label),
        country: normalize::non_empty(item.country),
        barcode: item.barcode.into_iter().next().filter(|b| !b.trim().is_empty()),
        url: item.uri.as_deref().and_then(site_url),
    })
}

/// Convert a full release lookup
pub fn to_detail(release: dto::Release) -> ReleaseDetail {
    let cover_image = primary_image(&release.images);
    let images = release
        .images
        .iter()
        .filter_map(|img| normalize::usable_image(img.uri.as_deref()))
        .collect();

    let artist = normalize::join_values(release.artists.iter().map(|a| a.name.as_str()))
        .unwrap_or_else(|| normalize::UNKNOWN_DETAIL_ARTIST.to_string());

    let barcode = release
        .identifiers
        .iter()
        .find(|i| i.identifier_type == "Barcode")
        .and_then(|i| normalize::non_empty(i.value.clone()));

    let candidate = ReleaseCandidate {
        id: release.id,
        source: CatalogSource::Discogs,
        title: release.title,
        artist,
        year: release.year,
        cover_image,
        format: normalize::join_values(release.formats.iter().map(|f| f.name.as_str())),
        label: normalize::join_values(release.labels.iter().map(|l| l.name.as_str())),
        country: normalize::non_empty(release.country),
        barcode,
        url: release.uri.as_deref().and_then(site_url),
    };

    ReleaseDetail {
        release: candidate,
        images,
        genres: release.genres,
        styles: release.styles,
        tracks: to_tracks(release.tracklist),
        notes: normalize::non_empty(release.notes),
    }
}

/// Convert the search pagination block
pub fn to_pagination(pagination: dto::Pagination) -> Pagination {
    Pagination {
        page: clamp_u32(pagination.page),
        per_page: clamp_u32(pagination.per_page),
        pages: clamp_u32(pagination.pages),
        total: pagination.items,
    }
}

/// Prefer the image tagged "primary", otherwise the first usable one
fn primary_image(images: &[dto::Image]) -> Option<String> {
    images
        .iter()
        .find(|img| img.image_type.as_deref() == Some("primary"))
        .and_then(|img| normalize::resolve_cover(img.uri.as_deref(), img.uri150.as_deref()))
        .or_else(|| {
            images
                .iter()
                .find_map(|img| normalize::resolve_cover(img.uri.as_deref(), img.uri150.as_deref()))
        })
}

/// Keep entries with both a position and a title (drops headings and index rows)
fn to_tracks(tracklist: Vec<dto::TrackEntry>) -> Vec<Track> {
    tracklist
        .into_iter()
        .filter(|t| !t.position.trim().is_empty() && !t.title.trim().is_empty())
        .map(|t| Track {
            position: t.position,
            title: t.title,
            duration: normalize::non_empty(t.duration),
        })
        .collect()
}

fn site_url(uri: &str) -> Option<String> {
    let uri = uri.trim();
    if uri.is_empty() {
        None
    } else if uri.starts_with('/') {
        Some(format!("{SITE_URL}{uri}"))
    } else {
        Some(uri.to_string())
    }
}

fn clamp_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{discogs_image, discogs_release, discogs_search_item, discogs_track};

    #[test]
    fn test_convert_vinyl_search_item() {
        let item = discogs_search_item(249504, "Pink Floyd - The Dark Side Of The Moon", &["Vinyl", "LP", "Album"]);

        let candidate = to_candidate(item, &FormatFilter::vinyl()).expect("vinyl should pass");

        assert_eq!(candidate.id, "249504");
        assert_eq!(candidate.source, CatalogSource::Discogs);
        assert_eq!(candidate.artist, "Pink Floyd");
        assert_eq!(candidate.title, "Pink Floyd - The Dark Side Of The Moon");
        assert_eq!(candidate.format.as_deref(), Some("Vinyl, LP, Album"));
        assert_eq!(candidate.barcode.as_deref(), Some("5099902987766"));
        assert_eq!(
            candidate.url.as_deref(),
            Some("https://www.discogs.com/release/249504")
        );
    }

    #[test]
    fn test_cd_is_dropped() {
        let item = discogs_search_item(1, "Pink Floyd - The Dark Side Of The Moon", &["CD", "Album"]);
        assert!(to_candidate(item, &FormatFilter::vinyl()).is_none());
    }

    #[test]
    fn test_cd_kept_when_filter_disabled() {
        let item = discogs_search_item(1, "Pink Floyd - The Dark Side Of The Moon", &["CD", "Album"]);
        assert!(to_candidate(item, &FormatFilter::Any).is_some());
    }

    #[test]
    fn test_placeholder_cover_falls_back_to_thumb() {
        let mut item = discogs_search_item(1, "A - B", &["Vinyl"]);
        item.cover_image = Some("https://st.discogs.com/images/spacer.gif".to_string());
        item.thumb = Some("https://i.discogs.com/thumb.jpg".to_string());

        let candidate = to_candidate(item, &FormatFilter::vinyl()).unwrap();
        assert_eq!(candidate.cover_image.as_deref(), Some("https://i.discogs.com/thumb.jpg"));
    }

    #[test]
    fn test_placeholder_everywhere_means_no_cover() {
        let mut item = discogs_search_item(1, "A - B", &["Vinyl"]);
        item.cover_image = Some("https://st.discogs.com/images/spacer.gif".to_string());
        item.thumb = Some("https://st.discogs.com/images/spacer.gif".to_string());

        let candidate = to_candidate(item, &FormatFilter::vinyl()).unwrap();
        assert!(candidate.cover_image.is_none());
    }

    #[test]
    fn test_title_without_separator() {
        let item = discogs_search_item(1, "Untitled Pressing", &["LP"]);
        let candidate = to_candidate(item, &FormatFilter::vinyl()).unwrap();
        assert_eq!(candidate.artist, normalize::UNKNOWN_ARTIST);
        assert_eq!(candidate.title, "Untitled Pressing");
    }

    #[test]
    fn test_normalizing_twice_is_equal() {
        let item = discogs_search_item(42, "Can - Tago Mago", &["Vinyl", "LP"]);
        let a = to_candidate(item.clone(), &FormatFilter::vinyl()).unwrap();
        let b = to_candidate(item, &FormatFilter::vinyl()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_detail_prefers_primary_image() {
        let mut release = discogs_release(249504, "The Dark Side Of The Moon");
        release.images = vec![
            discogs_image("secondary", "https://i.discogs.com/back.jpg"),
            discogs_image("primary", "https://i.discogs.com/front.jpg"),
        ];

        let detail = to_detail(release);

        assert_eq!(detail.release.cover_image.as_deref(), Some("https://i.discogs.com/front.jpg"));
        assert_eq!(detail.images.len(), 2);
    }

    #[test]
    fn test_detail_falls_back_to_first_image() {
        let mut release = discogs_release(1, "B-Sides");
        release.images = vec![
            discogs_image("secondary", "https://i.discogs.com/one.jpg"),
            discogs_image("secondary", "https://i.discogs.com/two.jpg"),
        ];

        let detail = to_detail(release);
        assert_eq!(detail.release.cover_image.as_deref(), Some("https://i.discogs.com/one.jpg"));
    }

    #[test]
    fn test_detail_without_artists_is_unknown() {
        let mut release = discogs_release(1, "Mystery");
        release.artists.clear();
        let detail = to_detail(release);
        assert_eq!(detail.release.artist, normalize::UNKNOWN_DETAIL_ARTIST);
    }

    #[test]
    fn test_detail_barcode_from_identifiers() {
        let detail = to_detail(discogs_release(249504, "The Dark Side Of The Moon"));
        assert_eq!(detail.release.barcode.as_deref(), Some("5099902987766"));
        assert_eq!(detail.release.artist, "Pink Floyd");
        assert_eq!(detail.release.format.as_deref(), Some("Vinyl"));
        assert_eq!(detail.release.label.as_deref(), Some("Harvest"));
    }

    #[test]
    fn test_tracks_drop_headings_and_untitled() {
        let mut release = discogs_release(1, "Album");
        release.tracklist = vec![
            discogs_track("", "Side A", ""),
            discogs_track("A1", "Speak To Me", "1:30"),
            discogs_track("A2", "", "2:00"),
            discogs_track("A3", "Breathe", ""),
        ];

        let detail = to_detail(release);

        assert_eq!(detail.tracks.len(), 2);
        assert_eq!(detail.tracks[0].position, "A1");
        assert_eq!(detail.tracks[0].duration.as_deref(), Some("1:30"));
        assert_eq!(detail.tracks[1].title, "Breathe");
        assert!(detail.tracks[1].duration.is_none());
    }

    #[test]
    fn test_pagination_passthrough() {
        let pagination = to_pagination(dto::Pagination {
            page: 2,
            pages: 5,
            per_page: 20,
            items: 97,
        });
        assert_eq!(pagination.page, 2);
        assert_eq!(pagination.pages, 5);
        assert_eq!(pagination.per_page, 20);
        assert_eq!(pagination.total, 97);
    }
}
