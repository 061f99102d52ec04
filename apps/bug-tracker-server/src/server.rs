use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderName, Request};
use bugs::BugsModule;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, info};

use crate::config::{AppConfig, DatabaseConfig};
use crate::cors::build_cors_layer;
use crate::signals::wait_for_shutdown;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Open the configured database.
///
/// # Errors
/// Fails if the URL is unsupported or the database is unreachable.
pub async fn connect_database(cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    if cfg.is_in_memory() {
        opts.min_connections(1);
    }

    info!(in_memory = cfg.is_in_memory(), "Connecting to database");
    Database::connect(opts)
        .await
        .context("failed to connect to database")
}

/// Wrap the module router with the HTTP stack: CORS, request id and tracing.
///
/// Layers run outermost first: CORS, `SetRequestId`, `PropagateRequestId`, Trace.
pub fn build_app(module: &BugsModule, config: &AppConfig) -> Router {
    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    module
        .router()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<Body>| {
                    let rid = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("n/a");
                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        uri = %req.uri().path(),
                        version = ?req.version(),
                        request_id = %rid,
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
        .layer(build_cors_layer(&config.cors))
}

/// Migrate, bind and serve until a shutdown signal arrives.
///
/// # Errors
/// Fails on database, migration or bind errors, or if the server stops abnormally.
pub async fn run(config: AppConfig) -> Result<()> {
    let db = connect_database(&config.database).await?;
    BugsModule::migrate(&db).await?;

    let module = BugsModule::new(db, config.bugs_config());
    let app = build_app(&module, &config);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        addr = %listener.local_addr().map_or(addr, |a| a.to_string()),
        environment = ?config.server.environment,
        "Server running"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}
