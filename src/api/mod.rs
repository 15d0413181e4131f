//! REST API routes for VinylVault
//!
//! Identity is handled in front of these routes; handlers only see the
//! catalog search service.

pub mod vinyls;

use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

use crate::catalog::SearchService;
use crate::catalog::domain::DEFAULT_PER_PAGE;

/// Shared state handed to every handler
pub struct AppState {
    pub search: SearchService,
    /// Page size used when a request doesn't give one
    pub default_per_page: u32,
}

impl AppState {
    pub fn new(search: SearchService) -> Self {
        Self {
            search,
            default_per_page: DEFAULT_PER_PAGE,
        }
    }

    pub fn with_default_per_page(mut self, per_page: u32) -> Self {
        self.default_per_page = per_page;
        self
    }
}

/// Configure all API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Liveness probe
        .service(health)
        // Catalog search routes
        .service(web::scope("/api/vinyls").configure(vinyls::configure));
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({"status": "ok"}))
}
