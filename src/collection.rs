//! Input shape for adding a record to a user's collection.
//!
//! Storage lives outside this crate. What a search or lookup returns converts
//! straight into [`NewRelease`], the payload the collection store accepts.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogSource, ReleaseCandidate, ReleaseDetail, Track};

/// A record about to be added to a collection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRelease {
    pub title: String,
    pub artist: String,
    pub year: Option<i32>,
    /// User category; chosen by the user, never by a catalog
    pub category_id: Option<String>,
    pub cover_image: Option<String>,
    pub barcode: Option<String>,
    pub label: Option<String>,
    pub format: Option<String>,
    pub country: Option<String>,
    pub discogs_id: Option<String>,
    pub musicbrainz_id: Option<String>,
    pub notes: Option<String>,
    pub tracks: Vec<NewTrack>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTrack {
    pub position: String,
    pub title: String,
    pub duration: Option<String>,
}

impl NewRelease {
    pub fn in_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }
}

impl From<ReleaseCandidate> for NewRelease {
    fn from(candidate: ReleaseCandidate) -> Self {
        let (discogs_id, musicbrainz_id) = match candidate.source {
            CatalogSource::Discogs => (Some(candidate.id), None),
            CatalogSource::MusicBrainz => (None, Some(candidate.id)),
        };

        Self {
            title: candidate.title,
            artist: candidate.artist,
            year: candidate.year,
            category_id: None,
            cover_image: candidate.cover_image,
            barcode: candidate.barcode,
            label: candidate.label,
            format: candidate.format,
            country: candidate.country,
            discogs_id,
            musicbrainz_id,
            notes: None,
            tracks: Vec::new(),
        }
    }
}

impl From<ReleaseDetail> for NewRelease {
    fn from(detail: ReleaseDetail) -> Self {
        Self {
            notes: detail.notes,
            tracks: detail.tracks.into_iter().map(NewTrack::from).collect(),
            ..Self::from(detail.release)
        }
    }
}

impl From<Track> for NewTrack {
    fn from(track: Track) -> Self {
        Self {
            position: track.position,
            title: track.title,
            duration: track.duration,
        }
    }
}
