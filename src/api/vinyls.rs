//! Vinyl search API routes
//!
//! Catalog searches used by the "add a record" screens: free-text search,
//! barcode scan and release details for prefilling the form.

use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use serde_json::json;

use super::AppState;
use crate::catalog::CatalogError;
use crate::catalog::domain::DEFAULT_RELEASE_TYPE;

/// query parameters for text search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    #[serde(rename = "type")]
    pub release_type: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// query parameters for barcode search
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// search the catalog by text
#[get("/search")]
pub async fn search(state: web::Data<AppState>, params: web::Query<SearchParams>) -> HttpResponse {
    let params = params.into_inner();
    let query = params.query.unwrap_or_default();
    let release_type = params.release_type.as_deref().unwrap_or(DEFAULT_RELEASE_TYPE);
    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(state.default_per_page);

    tracing::info!("Search request: {:?} type {} page {}", query, release_type, page);

    match state
        .search
        .search_by_text(&query, release_type, page, per_page)
        .await
    {
        Ok(page) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": page.results,
            "pagination": page.pagination,
        })),
        Err(e) => error_response(&e, "Failed to search records"),
    }
}

/// search the catalog by barcode
#[get("/search/barcode/{barcode}")]
pub async fn search_by_barcode(
    state: web::Data<AppState>,
    path: web::Path<String>,
    params: web::Query<PageParams>,
) -> HttpResponse {
    let barcode = path.into_inner();
    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(state.default_per_page);

    tracing::info!("Barcode search request: {} page {}", barcode, page);

    match state.search.search_by_barcode(&barcode, page, per_page).await {
        Ok(page) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": {
                "source": state.search.source(),
                "results": page.results,
                "pagination": page.pagination,
            },
        })),
        Err(e) => error_response(&e, "Failed to search records"),
    }
}

/// full release details, also served at the older `/discogs/{id}` path
pub async fn release_details(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();

    match state.search.get_detail(&id).await {
        Ok(detail) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": detail,
        })),
        Err(e) => error_response(&e, "Failed to fetch release details"),
    }
}

/// Map a catalog error to a `{success: false, message}` response
fn error_response(error: &CatalogError, fallback: &str) -> HttpResponse {
    match error {
        CatalogError::InvalidArgument(message) => {
            HttpResponse::BadRequest().json(json!({"success": false, "message": message}))
        }
        CatalogError::NotFound(_) => HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "Release not found",
        })),
        other => {
            tracing::error!("{}: {}", fallback, other);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": fallback,
            }))
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(search)
        .service(search_by_barcode)
        .service(
            web::resource(["/releases/{id}", "/discogs/{id}"])
                .route(web::get().to(release_details)),
        );
}
