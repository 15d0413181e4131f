//! MusicBrainz HTTP client
//!
//! Handles communication with the MusicBrainz web service.
//! See: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! IMPORTANT: MusicBrainz requires a User-Agent header and rate limits to 1 req/sec.
//! The client itself does not throttle; callers go through the search service,
//! which owns the channel's [`RateLimiter`](crate::catalog::RateLimiter).

use std::time::Duration;

use super::dto;
use crate::catalog::domain::{CatalogError, SearchKind, SearchQuery};
use crate::catalog::http;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://musicbrainz.org/ws/2";

/// Includes requested on release lookups. The `+` separators must stay literal.
const RELEASE_INCLUDES: &str = "artists+labels+recordings+release-groups";

/// MusicBrainz API client
#[derive(Clone)]
pub struct MusicBrainzClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl MusicBrainzClient {
    /// Create a new client against the public web service
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, CatalogError> {
        Self::with_base_url(user_agent, DEFAULT_BASE_URL, timeout)
    }

    /// Create a client with a custom base URL (mirrors, tests)
    pub fn with_base_url(
        user_agent: &str,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            http_client: http::build_client(user_agent, timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Run a release search. Barcodes become a `barcode:` Lucene query.
    pub async fn search(&self, query: &SearchQuery) -> Result<dto::SearchResponse, CatalogError> {
        let lucene = match &query.kind {
            SearchKind::Text { query, release_type } => {
                if release_type != "release" {
                    tracing::debug!(
                        "MusicBrainz search only supports releases, ignoring type {:?}",
                        release_type
                    );
                }
                query.clone()
            }
            SearchKind::Barcode(barcode) => format!("barcode:{barcode}"),
        };

        let url = format!("{}/release", self.base_url);
        let limit = query.per_page.to_string();
        let offset = query.offset().to_string();
        let params = [
            ("query", lucene.as_str()),
            ("fmt", "json"),
            ("limit", limit.as_str()),
            ("offset", offset.as_str()),
        ];

        tracing::debug!("MusicBrainz API: GET {} {:?}", url, params);

        let response = self
            .http_client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(http::network_error)?;

        http::decode(response, "search").await
    }

    /// Look up a release by MBID, including recordings and labels
    pub async fn release(&self, id: &str) -> Result<dto::Release, CatalogError> {
        // Built by hand so the `+` in the include list isn't encoded as %2B
        let url = format!(
            "{}/release/{}?inc={}&fmt=json",
            self.base_url,
            urlencoding::encode(id),
            RELEASE_INCLUDES
        );

        tracing::debug!("MusicBrainz API: GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(http::network_error)?;

        http::decode(response, &format!("release {id}")).await
    }
}
