//! Catalog module - searches external release catalogs for records to add to a collection.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Our types (`ReleaseCandidate`, `SearchPage`, ...)
//! - **API DTOs** (`discogs/dto.rs`, `musicbrainz/dto.rs`, `coverart/dto.rs`) - Exact API response shapes
//! - **Adapters** - Convert DTOs to domain models, one per provider
//! - **Normalizer** (`normalize.rs`) - Rules shared by every provider (vinyl filter, covers, artists)
//! - **Clients** - HTTP clients for external APIs
//! - **Rate limiter** - Minimum spacing between requests on a channel
//! - **Service** - High-level orchestration of searches and lookups
//!
//! # Usage
//!
//! ```ignore
//! use vinyl_vault::catalog::SearchService;
//!
//! let service = SearchService::from_config(&config)?;
//! let page = service.search_by_text("Dark Side of the Moon", "release", 1, 20).await?;
//! for release in page.results {
//!     println!("{} - {} ({:?})", release.artist, release.title, release.year);
//! }
//! ```

pub mod domain;
pub mod discogs;
pub mod musicbrainz;
pub mod coverart;
pub mod normalize;
pub mod rate_limit;
pub mod traits;
pub mod service;
mod de;
mod http;

pub use domain::{
    CatalogError, CatalogSource, Pagination, ReleaseCandidate, ReleaseDetail, ReleaseKey,
    SearchPage, SearchQuery, Track,
};
pub use http::USER_AGENT;
pub use normalize::FormatFilter;
pub use rate_limit::RateLimiter;
pub use service::{SearchOptions, SearchService};
