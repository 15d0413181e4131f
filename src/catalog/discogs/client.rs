//! Discogs HTTP client
//!
//! Handles communication with the Discogs database API.
//! See: https://www.discogs.com/developers
//!
//! Requests are authenticated with a personal access token sent as
//! `Authorization: Discogs token=<token>`. Without a token Discogs still answers
//! release lookups but search requests are refused, so a missing token is
//! logged once at construction.

use std::time::Duration;

use super::dto;
use crate::catalog::domain::{CatalogError, SearchKind, SearchQuery};
use crate::catalog::http;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://api.discogs.com";

/// Discogs API client
#[derive(Clone)]
pub struct DiscogsClient {
    http_client: reqwest::Client,
    token: Option<String>,
    base_url: String,
}

impl DiscogsClient {
    /// Create a new client against the public API
    pub fn new(token: Option<String>, timeout: Duration) -> Result<Self, CatalogError> {
        Self::with_base_url(token, DEFAULT_BASE_URL, timeout)
    }

    /// Create a client with a custom base URL (mirrors, tests)
    pub fn with_base_url(
        token: Option<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let token = token.filter(|t| !t.trim().is_empty());
        match &token {
            Some(_) => tracing::debug!("Discogs token configured"),
            None => tracing::warn!("Discogs token not configured; set DISCOGS_TOKEN"),
        }

        Ok(Self {
            http_client: http::build_client(http::USER_AGENT, timeout)?,
            token,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Run a text or barcode search
    pub async fn search(&self, query: &SearchQuery) -> Result<dto::SearchResponse, CatalogError> {
        let url = format!("{}/database/search", self.base_url);
        let page = query.page.to_string();
        let per_page = query.per_page.to_string();

        let mut params: Vec<(&str, &str)> = match &query.kind {
            SearchKind::Text {
                query,
                release_type,
            } => vec![("q", query.as_str()), ("type", release_type.as_str())],
            SearchKind::Barcode(barcode) => vec![("barcode", barcode.as_str()), ("type", "release")],
        };
        params.push(("page", &page));
        params.push(("per_page", &per_page));

        tracing::debug!("Discogs API: GET {} {:?}", url, params);

        let response = self
            .authorized(self.http_client.get(&url).query(&params))
            .send()
            .await
            .map_err(http::network_error)?;

        let parsed: dto::SearchResponse = http::decode(response, "search").await?;
        tracing::debug!("Discogs search returned {} result(s)", parsed.results.len());
        Ok(parsed)
    }

    /// Fetch a release by its Discogs id
    pub async fn release(&self, id: &str) -> Result<dto::Release, CatalogError> {
        let url = format!("{}/releases/{}", self.base_url, urlencoding::encode(id));

        tracing::debug!("Discogs API: GET {}", url);

        let response = self
            .authorized(self.http_client.get(&url))
            .send()
            .await
            .map_err(http::network_error)?;

        http::decode(response, &format!("release {id}")).await
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header(
                reqwest::header::AUTHORIZATION,
                format!("Discogs token={token}"),
            ),
            None => request,
        }
    }
}
