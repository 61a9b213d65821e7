//! CarHire Server
//!
//! Car-rental pricing, booking lifecycle and review service.

use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpResponse, HttpServer};
use carhire_api::{configure_routes, AppServices};
use carhire_core::{AppConfig, AppError};
use carhire_store::{load_seed, SeedData};
use carhire_upstream::HttpSearchProvider;
use std::env;
use std::io;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "carhire={},carhire_api={},carhire_services={},carhire_store={},carhire_upstream={},actix_web=info",
            log_level, log_level, log_level, log_level, log_level
        ))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

fn startup_error(context: &str, e: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", context, e);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, e))
}

/// Build the service graph from configuration
fn build_services(config: &AppConfig) -> io::Result<AppServices> {
    let seed = match &config.store.seed_path {
        Some(path) => {
            load_seed(path).map_err(|e| startup_error("Failed to load catalog", e))?
        }
        None => {
            warn!("No store.seed_path configured, starting with an empty catalog");
            SeedData::default()
        }
    };

    let services = AppServices::from_seed(seed, config.pricing.clone());

    match &config.upstream.search_url {
        Some(url) => {
            let provider = HttpSearchProvider::new(url, config.upstream.timeout_ms)
                .map_err(|e| startup_error("Failed to create search client", e))?;
            info!(endpoint = %url, timeout_ms = config.upstream.timeout_ms, "Search provider enabled");
            Ok(services.with_search_provider(Arc::new(provider)))
        }
        None => {
            info!("No upstream.search_url configured, search endpoint disabled");
            Ok(services)
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    init_tracing();

    info!("Starting CarHire v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load().map_err(|e| startup_error("Invalid configuration", e))?;
    let services = build_services(&config)?;

    let bind_addr = config.server_addr();
    let workers = config.server.workers;
    let cors_origins = config.server.cors_origins.clone();

    info!(
        "Starting HTTP server on {} with {} workers",
        bind_addr, workers
    );

    HttpServer::new(move || {
        let cors_origins_inner = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                let origins: Vec<&str> = cors_origins_inner.split(',').collect();
                if let Ok(origin_str) = origin.to_str() {
                    origins.iter().any(|o| o.trim() == origin_str)
                } else {
                    false
                }
            })
            .allowed_methods(vec!["GET", "POST", "PATCH", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .configure(|cfg| services.register(cfg))
            // Malformed bodies and queries answer with the same JSON error shape as handlers
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::Validation(err.to_string()).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::Validation(err.to_string()).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                AppError::Validation(err.to_string()).into()
            }))
            // Middleware
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(middleware::Logger::new("%a \"%r\" %s %b %Dms"))
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_routes)
            // Root redirect to health
            .route(
                "/",
                web::get().to(|| async {
                    HttpResponse::Found()
                        .append_header(("Location", "/api/v1/health"))
                        .finish()
                }),
            )
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run()
    .await
}
