use dotenvy::dotenv;
use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{CorsLayer, Any};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnResponse};
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod api {
    pub mod google_auth;
    pub mod google_sheets;
}
mod config {
    pub mod app_config;
}
mod handlers {
    pub mod lead_dtos;
    pub mod lead_handlers;
}
mod models {
    pub mod lead_models;
}
mod repositories {
    pub mod lead_sheet;
}

use api::google_auth::ServiceAccountAuth;
use api::google_sheets::GoogleSheetsClient;
use config::app_config::AppConfig;
use handlers::lead_handlers;
use repositories::lead_sheet::LeadSheet;

async fn health_check() -> &'static str {
    "OK"
}

pub struct AppState {
    pub leads: LeadSheet,
}

pub fn build_router(state: Arc<AppState>, frontend_dist: Option<&Path>) -> Router {
    let app = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/leads", post(lead_handlers::submit_lead))
        // Path the lead form used before the service moved to /api/leads.
        .route("/api/sheets", post(lead_handlers::submit_lead))
        .with_state(state);

    let app = match frontend_dist {
        Some(dist) => {
            tracing::info!("Serving frontend from {}", dist.display());
            app.fallback_service(
                ServeDir::new(dist).not_found_service(ServeFile::new(dist.join("index.html"))),
            )
        }
        None => app,
    };

    app.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        )
        .layer(
            CorsLayer::new()
                .allow_methods([
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_origin(Any)
                .allow_headers([axum::http::header::CONTENT_TYPE])
        )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = AppConfig::from_env().context("invalid configuration")?;

    let _guard = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((dsn, sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        }))
    });

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(
        "Storing leads in sheet '{}' as {} (project {})",
        config.sheet_name,
        config.credentials.client_email,
        config.credentials.project_id.as_deref().unwrap_or("unknown"),
    );

    let http = reqwest::Client::new();
    let auth = ServiceAccountAuth::new(config.credentials.clone(), http.clone());
    let sheets = GoogleSheetsClient::new(http, auth, config.sheet_id.clone());

    let state = Arc::new(AppState {
        leads: LeadSheet::new(Arc::new(sheets), config.sheet_name.clone(), config.timezone),
    });

    let app = build_router(state, config.frontend_dist.as_deref());

    use tokio::net::TcpListener;

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
