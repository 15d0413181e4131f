//! Search service - orchestrates catalog searches and release lookups
//!
//! This is the high-level API used by the CLI and the HTTP routes:
//! 1. Validate and coerce the request (blank queries, page bounds)
//! 2. Wait for the channel's rate limiter, if it has one
//! 3. Call the catalog client
//! 4. Normalize and filter the raw records
//! 5. Fill in missing MusicBrainz covers from the Cover Art Archive
//!
//! Searches never fail because the provider did: an unreachable or erroring
//! catalog yields an empty page with no pagination. Detail lookups propagate
//! provider errors so callers can tell "not found" from "down".

use std::sync::Arc;
use std::time::Duration;

use futures::{StreamExt, stream};

use super::coverart::CoverArtClient;
use super::discogs::DiscogsClient;
use super::domain::{
    CatalogError, CatalogSource, DEFAULT_RELEASE_TYPE, ReleaseCandidate, ReleaseDetail,
    SearchPage, SearchQuery,
};
use super::musicbrainz::MusicBrainzClient;
use super::normalize::{self, FormatFilter};
use super::rate_limit::RateLimiter;
use super::traits::{CatalogApi, CoverArtApi};
use crate::config::Config;

/// Default timeout for a single cover art lookup
pub const DEFAULT_COVER_TIMEOUT: Duration = Duration::from_secs(5);

/// Default number of cover art lookups in flight per search
pub const DEFAULT_COVER_CONCURRENCY: usize = 4;

/// Tuning for the search service
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Which formats survive a search
    pub filter: FormatFilter,
    /// Timeout per cover art lookup
    pub cover_timeout: Duration,
    /// Cover art lookups in flight at once
    pub cover_concurrency: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            filter: FormatFilter::vinyl(),
            cover_timeout: DEFAULT_COVER_TIMEOUT,
            cover_concurrency: DEFAULT_COVER_CONCURRENCY,
        }
    }
}

/// Search and lookup over one catalog
pub struct SearchService {
    catalog: Arc<dyn CatalogApi>,
    cover_art: Option<Arc<dyn CoverArtApi>>,
    limiter: Option<Arc<RateLimiter>>,
    options: SearchOptions,
}

impl SearchService {
    /// Create a service without rate limiting or cover art lookups
    pub fn new(catalog: Arc<dyn CatalogApi>, options: SearchOptions) -> Self {
        Self {
            catalog,
            cover_art: None,
            limiter: None,
            options,
        }
    }

    /// Resolve missing covers through `cover_art`
    pub fn with_cover_art(mut self, cover_art: Arc<dyn CoverArtApi>) -> Self {
        self.cover_art = Some(cover_art);
        self
    }

    /// Route every catalog call through `limiter`
    pub fn with_rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// Build the service for the configured provider.
    ///
    /// Discogs gets no limiter. MusicBrainz gets a limiter and the Cover Art
    /// Archive for covers.
    pub fn from_config(config: &Config) -> Result<Self, CatalogError> {
        let catalog = &config.catalog;
        let options = SearchOptions {
            filter: config.filter.format_filter(),
            cover_timeout: catalog.cover_timeout(),
            cover_concurrency: catalog.cover_concurrency.max(1),
        };

        let service = match catalog.provider {
            CatalogSource::Discogs => {
                let client = DiscogsClient::with_base_url(
                    config.credentials.discogs_token.clone(),
                    catalog.discogs_base_url.as_str(),
                    catalog.request_timeout(),
                )?;
                if !client.has_token() {
                    tracing::info!("Searching Discogs anonymously (lower rate limit)");
                }
                Self::new(Arc::new(client), options)
            }
            CatalogSource::MusicBrainz => {
                let user_agent = config.credentials.musicbrainz_user_agent.as_str();
                let client = MusicBrainzClient::with_base_url(
                    user_agent,
                    catalog.musicbrainz_base_url.as_str(),
                    catalog.request_timeout(),
                )?;
                let cover_art = CoverArtClient::with_base_url(
                    user_agent,
                    catalog.cover_art_base_url.as_str(),
                    catalog.cover_timeout(),
                )?;
                let limiter = RateLimiter::new(catalog.musicbrainz_min_interval());
                tracing::info!(
                    "MusicBrainz requests spaced {:?} apart",
                    limiter.min_interval()
                );
                Self::new(Arc::new(client), options)
                    .with_cover_art(Arc::new(cover_art))
                    .with_rate_limiter(Arc::new(limiter))
            }
        };

        tracing::info!("Catalog provider: {}", service.source());
        Ok(service)
    }

    pub fn source(&self) -> CatalogSource {
        self.catalog.source()
    }

    /// Free-text search.
    ///
    /// Only a blank query is an error; provider failures give an empty page.
    pub async fn search_by_text(
        &self,
        query: &str,
        release_type: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchPage, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::InvalidArgument(
                "search query is required".to_string(),
            ));
        }
        let release_type = match release_type.trim() {
            "" => DEFAULT_RELEASE_TYPE,
            other => other,
        };

        Ok(self
            .run_search(SearchQuery::text(query, release_type, page, per_page))
            .await)
    }

    /// Barcode search, same contract as [`search_by_text`](Self::search_by_text)
    pub async fn search_by_barcode(
        &self,
        barcode: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchPage, CatalogError> {
        let barcode = barcode.trim();
        if barcode.is_empty() {
            return Err(CatalogError::InvalidArgument(
                "barcode is required".to_string(),
            ));
        }

        Ok(self
            .run_search(SearchQuery::barcode(barcode, page, per_page))
            .await)
    }

    /// Full release with tracklist. Provider errors are returned as-is.
    pub async fn get_detail(&self, id: &str) -> Result<ReleaseDetail, CatalogError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(CatalogError::InvalidArgument(
                "release id is required".to_string(),
            ));
        }

        self.wait_turn().await;
        let raw = self.catalog.release(id).await?;
        let mut detail = normalize::detail(raw);

        if detail.release.cover_image.is_none() && detail.release.source == CatalogSource::MusicBrainz {
            if let Some(cover_art) = &self.cover_art {
                if let Some(cover) = self.cover_for(cover_art.as_ref(), &detail.release.id).await {
                    detail.images.push(cover.clone());
                    detail.release.cover_image = Some(cover);
                }
            }
        }

        tracing::info!(
            "Fetched {} release {} ({} tracks)",
            detail.release.source,
            detail.release.id,
            detail.tracks.len()
        );
        Ok(detail)
    }

    async fn run_search(&self, query: SearchQuery) -> SearchPage {
        self.wait_turn().await;

        let raw = match self.catalog.search(&query).await {
            Ok(raw) => raw,
            Err(e) if e.is_upstream_unavailable() => {
                tracing::warn!(
                    "{} search failed, returning no results: {}",
                    self.source(),
                    e
                );
                return SearchPage::empty();
            }
            Err(e) => {
                tracing::error!("{} search returned an unusable response: {}", self.source(), e);
                return SearchPage::empty();
            }
        };

        let received = raw.items.len();
        let results: Vec<ReleaseCandidate> = raw
            .items
            .into_iter()
            .filter_map(|item| normalize::candidate(item, &self.options.filter))
            .collect();
        let results = self.attach_covers(results).await;

        tracing::info!(
            "{} search: {} of {} result(s) kept (page {})",
            self.source(),
            results.len(),
            received,
            query.page
        );

        SearchPage {
            results,
            pagination: raw.pagination,
        }
    }

    async fn wait_turn(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.acquire().await;
        }
    }

    /// Look up covers for MusicBrainz candidates that have none, keeping order
    async fn attach_covers(&self, candidates: Vec<ReleaseCandidate>) -> Vec<ReleaseCandidate> {
        let Some(cover_art) = self.cover_art.as_deref() else {
            return candidates;
        };

        stream::iter(candidates)
            .map(|mut candidate| async move {
                if candidate.cover_image.is_none() && candidate.source == CatalogSource::MusicBrainz {
                    candidate.cover_image = self.cover_for(cover_art, &candidate.id).await;
                }
                candidate
            })
            .buffered(self.options.cover_concurrency.max(1))
            .collect()
            .await
    }

    /// Best-effort cover lookup: failures and timeouts are `None`
    async fn cover_for(&self, cover_art: &dyn CoverArtApi, release_id: &str) -> Option<String> {
        match tokio::time::timeout(self.options.cover_timeout, cover_art.front_cover_url(release_id))
            .await
        {
            Ok(Ok(url)) => normalize::usable_image(url.as_deref()),
            Ok(Err(e)) => {
                tracing::debug!("Cover art lookup for {} failed: {}", release_id, e);
                None
            }
            Err(_) => {
                tracing::debug!("Cover art lookup for {} timed out", release_id);
                None
            }
        }
    }
}
