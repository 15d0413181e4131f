//! HTTP API server command.

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use tokio::runtime::Runtime;

use crate::api::{self, AppState};
use crate::config::Config;
use crate::error::Error;

use super::build_service;

/// Serve the REST API until interrupted
pub fn cmd_serve(rt: &Runtime, config: Config, bind: Option<&str>) -> anyhow::Result<()> {
    let addr = bind.unwrap_or(config.server.bind.as_str()).to_string();
    let service = build_service(&config)?;
    let state = web::Data::new(
        AppState::new(service).with_default_per_page(config.catalog.default_per_page),
    );

    rt.block_on(async move {
        tracing::info!("Server listening on http://{}", addr);
        tracing::info!("Health check: http://{}/health", addr);

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .app_data(state.clone())
                .wrap(cors)
                .wrap(middleware::Logger::default())
                .configure(api::configure)
        })
        .bind(&addr)
        .map_err(|e| Error::server(format!("failed to bind {addr}: {e}")))?
        .run()
        .await?;

        tracing::info!("Server stopped");
        Ok::<(), anyhow::Error>(())
    })
}
