//! Cover Art Archive HTTP client
//!
//! Looks up album artwork on the Cover Art Archive.
//! No API key required, but please respect their rate limits.
//!
//! API: https://coverartarchive.org

use std::time::Duration;

use super::dto;
use crate::catalog::domain::CatalogError;
use crate::catalog::http;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://coverartarchive.org";

/// Cover Art Archive client
#[derive(Clone)]
pub struct CoverArtClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl CoverArtClient {
    /// Create a new client
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, CatalogError> {
        Self::with_base_url(user_agent, DEFAULT_BASE_URL, timeout)
    }

    /// Create a client with a custom base URL
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

    /// List all cover art for a release
    pub async fn list_cover_art(&self, release_id: &str) -> Result<dto::CoverArtResponse, CatalogError> {
        let url = format!("{}/release/{}", self.base_url, urlencoding::encode(release_id));

        let response = self
            .http_client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(http::network_error)?;

        http::decode(response, &format!("cover art for {release_id}")).await
    }

    /// URL of the front cover (or the first listed image).
    ///
    /// Releases without artwork are `Ok(None)`, not an error.
    pub async fn front_cover_url(&self, release_id: &str) -> Result<Option<String>, CatalogError> {
        match self.list_cover_art(release_id).await {
            Ok(listing) => Ok(listing.front_or_first().map(|image| image.image.clone())),
            Err(CatalogError::NotFound(_)) => {
                tracing::debug!("No cover art for release {}", release_id);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
