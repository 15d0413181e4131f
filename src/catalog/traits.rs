//! Trait definitions for external catalog clients.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real client implementations, while tests
//! can substitute mock implementations.
//!
//! # Example
//!
//! ```ignore
//! use vinyl_vault::catalog::traits::CatalogApi;
//!
//! // In production code:
//! async fn count<T: CatalogApi>(client: &T, query: &SearchQuery) -> usize {
//!     client.search(query).await.map(|page| page.items.len()).unwrap_or(0)
//! }
//!
//! // In tests:
//! struct MockCatalog { ... }
//! impl CatalogApi for MockCatalog { ... }
//! ```

use async_trait::async_trait;

use super::coverart::CoverArtClient;
use super::discogs::{self, DiscogsClient};
use super::domain::{CatalogError, CatalogSource, SearchQuery};
use super::musicbrainz::{self, MusicBrainzClient};
use super::normalize::{RawRelease, RawSearchItem, RawSearchPage};

/// A release catalog that can be searched and queried by id.
///
/// Implementations return raw provider records; normalization happens in the
/// search service.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Which catalog this is
    fn source(&self) -> CatalogSource;

    /// Run a text or barcode search
    async fn search(&self, query: &SearchQuery) -> Result<RawSearchPage, CatalogError>;

    /// Fetch one release with its tracklist
    async fn release(&self, id: &str) -> Result<RawRelease, CatalogError>;
}

/// Trait for Cover Art Archive lookup.
#[async_trait]
pub trait CoverArtApi: Send + Sync {
    /// Front cover URL for a MusicBrainz release, `None` when it has no artwork
    async fn front_cover_url(&self, release_id: &str) -> Result<Option<String>, CatalogError>;
}

// Implement traits for real clients

#[async_trait]
impl CatalogApi for DiscogsClient {
    fn source(&self) -> CatalogSource {
        CatalogSource::Discogs
    }

    async fn search(&self, query: &SearchQuery) -> Result<RawSearchPage, CatalogError> {
        let response = DiscogsClient::search(self, query).await?;
        Ok(RawSearchPage {
            items: response
                .results
                .into_iter()
                .map(RawSearchItem::Discogs)
                .collect(),
            pagination: response.pagination.map(discogs::adapter::to_pagination),
        })
    }

    async fn release(&self, id: &str) -> Result<RawRelease, CatalogError> {
        DiscogsClient::release(self, id).await.map(RawRelease::Discogs)
    }
}

#[async_trait]
impl CatalogApi for MusicBrainzClient {
    fn source(&self) -> CatalogSource {
        CatalogSource::MusicBrainz
    }

    async fn search(&self, query: &SearchQuery) -> Result<RawSearchPage, CatalogError> {
        let response = MusicBrainzClient::search(self, query).await?;
        let pagination =
            musicbrainz::adapter::to_pagination(response.count, response.offset, query.per_page);
        Ok(RawSearchPage {
            items: response
                .releases
                .into_iter()
                .map(RawSearchItem::MusicBrainz)
                .collect(),
            pagination: Some(pagination),
        })
    }

    async fn release(&self, id: &str) -> Result<RawRelease, CatalogError> {
        MusicBrainzClient::release(self, id)
            .await
            .map(RawRelease::MusicBrainz)
    }
}

#[async_trait]
impl CoverArtApi for CoverArtClient {
    async fn front_cover_url(&self, release_id: &str) -> Result<Option<String>, CatalogError> {
        CoverArtClient::front_cover_url(self, release_id).await
    }
}
