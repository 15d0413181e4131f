//! Adapter layer: Convert MusicBrainz DTOs to domain models
//!
//! This is the ONLY place where MusicBrainz DTO types are converted to domain types.
//! Cover images are not part of MusicBrainz responses; they are resolved
//! afterwards through the Cover Art Archive.

use super::dto;
use crate::catalog::domain::{CatalogSource, Pagination, ReleaseCandidate, ReleaseDetail, Track};
use crate::catalog::normalize::{self, FormatFilter};

/// Base of MusicBrainz website links
const SITE_URL: &str = "https://musicbrainz.org/release";

/// Convert a search hit, or `None` if its media formats don't pass the filter
pub fn to_candidate(release: dto::Release, filter: &FormatFilter) -> Option<ReleaseCandidate> {
    let formats = media_formats(&release.media);
    if !filter.accepts(&formats) {
        tracing::debug!(
            id = %release.id,
            title = %release.title,
            formats = ?formats,
            "Dropping MusicBrainz result: format rejected"
        );
        return None;
    }

    Some(build_candidate(release, &formats, normalize::UNKNOWN_ARTIST))
}

/// Convert a release lookup (with recordings)
pub fn to_detail(release: dto::Release) -> ReleaseDetail {
    let formats = media_formats(&release.media);
    let tracks = to_tracks(&release.media);

    ReleaseDetail {
        release: build_candidate(release, &formats, normalize::UNKNOWN_DETAIL_ARTIST),
        images: Vec::new(),
        genres: Vec::new(),
        styles: Vec::new(),
        tracks,
        notes: None,
    }
}

/// Derive the page cursor from `count`/`offset` and the requested page size
pub fn to_pagination(count: u64, offset: u64, per_page: u32) -> Pagination {
    let per_page = per_page.max(1);
    let size = u64::from(per_page);
    Pagination {
        page: u32::try_from(offset / size + 1).unwrap_or(u32::MAX),
        per_page,
        pages: u32::try_from(count.div_ceil(size)).unwrap_or(u32::MAX),
        total: count,
    }
}

fn build_candidate(release: dto::Release, formats: &[String], unknown_artist: &str) -> ReleaseCandidate {
    let artist = build_artist_string(&release.artist_credit)
        .unwrap_or_else(|| unknown_artist.to_string());
    let year = extract_year(&release);
    let label = release
        .label_info
        .iter()
        .find_map(|info| info.label.as_ref())
        .map(|label| label.name.clone());
    let url = Some(format!("{SITE_URL}/{}", release.id));

    ReleaseCandidate {
        id: release.id,
        source: CatalogSource::MusicBrainz,
        title: release.title,
        artist,
        year,
        cover_image: None,
        format: normalize::join_values(formats),
        label: normalize::non_empty(label),
        country: normalize::non_empty(release.country),
        barcode: normalize::non_empty(release.barcode),
        url,
    }
}

/// Join credited names with ", "
fn build_artist_string(credits: &[dto::ArtistCredit]) -> Option<String> {
    normalize::join_values(credits.iter().filter_map(|credit| {
        credit
            .name
            .as_deref()
            .or_else(|| credit.artist.as_ref().map(|a| a.name.as_str()))
    }))
}

/// Distinct media formats in release order
fn media_formats(media: &[dto::Medium]) -> Vec<String> {
    let mut formats: Vec<String> = Vec::new();
    for format in media.iter().filter_map(|m| m.format.as_deref()) {
        if !formats.iter().any(|f| f == format) {
            formats.push(format.to_string());
        }
    }
    formats
}

/// Year from the release date, else the release group's first release
fn extract_year(release: &dto::Release) -> Option<i32> {
    release
        .date
        .as_deref()
        .and_then(parse_year)
        .or_else(|| {
            release
                .release_group
                .as_ref()
                .and_then(|rg| rg.first_release_date.as_deref())
                .and_then(parse_year)
        })
}

/// Parse the year from YYYY, YYYY-MM or YYYY-MM-DD
fn parse_year(date: &str) -> Option<i32> {
    date.split('-')
        .next()
        .and_then(|y| y.trim().parse().ok())
        .filter(|y: &i32| *y > 0)
}

/// Flatten media into "<medium>.<track>" positions
fn to_tracks(media: &[dto::Medium]) -> Vec<Track> {
    media
        .iter()
        .enumerate()
        .flat_map(|(medium_index, medium)| {
            medium
                .tracks
                .iter()
                .enumerate()
                .filter_map(move |(track_index, track)| {
                    let title = track.title.as_deref()?.trim();
                    if title.is_empty() {
                        return None;
                    }
                    Some(Track {
                        position: format!("{}.{}", medium_index + 1, track_index + 1),
                        title: title.to_string(),
                        duration: track.length.map(normalize::format_duration_ms),
                    })
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mb_medium, mb_release, mb_track};

    #[test]
    fn test_convert_vinyl_release() {
        let release = mb_release("f5093c06", "The Dark Side of the Moon", &["12\" Vinyl"]);

        let candidate = to_candidate(release, &FormatFilter::vinyl()).expect("vinyl should pass");

        assert_eq!(candidate.id, "f5093c06");
        assert_eq!(candidate.source, CatalogSource::MusicBrainz);
        assert_eq!(candidate.artist, "Pink Floyd");
        assert_eq!(candidate.year, Some(1973));
        assert_eq!(candidate.label.as_deref(), Some("Harvest"));
        assert_eq!(candidate.format.as_deref(), Some("12\" Vinyl"));
        assert!(candidate.cover_image.is_none());
        assert_eq!(
            candidate.url.as_deref(),
            Some("https://musicbrainz.org/release/f5093c06")
        );
    }

    #[test]
    fn test_cd_release_is_dropped() {
        let release = mb_release("x", "The Dark Side of the Moon", &["CD"]);
        assert!(to_candidate(release, &FormatFilter::vinyl()).is_none());
    }

    #[test]
    fn test_missing_credits_fall_back() {
        let mut release = mb_release("x", "Anonymous", &["Vinyl"]);
        release.artist_credit.clear();

        let candidate = to_candidate(release.clone(), &FormatFilter::vinyl()).unwrap();
        assert_eq!(candidate.artist, normalize::UNKNOWN_ARTIST);

        let detail = to_detail(release);
        assert_eq!(detail.release.artist, normalize::UNKNOWN_DETAIL_ARTIST);
    }

    #[test]
    fn test_collaboration_joined_with_comma() {
        let mut release = mb_release("x", "Under Pressure", &["7\" Vinyl"]);
        release.artist_credit = vec![
            dto::ArtistCredit {
                name: Some("Queen".to_string()),
                joinphrase: Some(" & ".to_string()),
                artist: None,
            },
            dto::ArtistCredit {
                name: None,
                joinphrase: None,
                artist: Some(dto::Artist {
                    id: "bowie".to_string(),
                    name: "David Bowie".to_string(),
                    sort_name: None,
                }),
            },
        ];

        let candidate = to_candidate(release, &FormatFilter::vinyl()).unwrap();
        assert_eq!(candidate.artist, "Queen, David Bowie");
    }

    #[test]
    fn test_year_falls_back_to_release_group() {
        let mut release = mb_release("x", "Reissue", &["Vinyl"]);
        release.date = None;
        release.release_group = Some(dto::ReleaseGroup {
            id: "rg".to_string(),
            title: None,
            primary_type: Some("Album".to_string()),
            first_release_date: Some("1969-09-26".to_string()),
        });

        let candidate = to_candidate(release, &FormatFilter::vinyl()).unwrap();
        assert_eq!(candidate.year, Some(1969));
    }

    #[test]
    fn test_empty_barcode_is_none() {
        let mut release = mb_release("x", "No Barcode", &["Vinyl"]);
        release.barcode = Some(String::new());
        let candidate = to_candidate(release, &FormatFilter::vinyl()).unwrap();
        assert!(candidate.barcode.is_none());
    }

    #[test]
    fn test_detail_track_positions_and_durations() {
        let mut release = mb_release("x", "Double LP", &[]);
        release.media = vec![
            mb_medium(
                "12\" Vinyl",
                vec![mb_track(Some("Side One Opener"), Some(248_000)), mb_track(None, None)],
            ),
            mb_medium("12\" Vinyl", vec![mb_track(Some("Closer"), None)]),
        ];

        let detail = to_detail(release);

        assert_eq!(detail.tracks.len(), 2);
        assert_eq!(detail.tracks[0].position, "1.1");
        assert_eq!(detail.tracks[0].duration.as_deref(), Some("4:08"));
        assert_eq!(detail.tracks[1].position, "2.1");
        assert!(detail.tracks[1].duration.is_none());
        assert_eq!(detail.release.format.as_deref(), Some("12\" Vinyl"));
    }

    #[test]
    fn test_pagination_from_offset() {
        let pagination = to_pagination(412, 20, 20);
        assert_eq!(pagination.page, 2);
        assert_eq!(pagination.pages, 21);
        assert_eq!(pagination.total, 412);

        let empty = to_pagination(0, 0, 20);
        assert_eq!(empty.page, 1);
        assert_eq!(empty.pages, 0);
    }
}
