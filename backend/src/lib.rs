//! # Arqueo Backend
//!
//! Cash-box reconciliation service for gas stations. An auditor counts the
//! physical bills and coins of every till (cash box), compares them with the
//! declared vales, and stores the finished session with its reports.
//!
//! ## Architecture
//!
//! ```text
//! HTTP client (wizard UI)
//!     ↓
//! IO Layer (axum handlers, DTO mappers)
//!     ↓
//! Domain Layer (reconciliation core, wizard, services)
//!     ↓
//! Storage Layer (sqlx SQLite repositories)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::BackendConfig;
use crate::domain::{NameService, ReconciliationService, ReportService, SessionService};
use crate::storage::{DbConnection, NameRepository, ReportRepository, SessionRepository};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub reconciliation_service: ReconciliationService,
    pub session_service: SessionService,
    pub report_service: ReportService,
    pub name_service: NameService,
}

impl AppState {
    /// Wire every service to the SQLite repositories of one connection
    pub fn from_connection(db: DbConnection) -> Self {
        let sessions = Arc::new(SessionRepository::new(db.clone()));
        let reports = Arc::new(ReportRepository::new(db.clone()));
        let names = Arc::new(NameRepository::new(db));

        Self {
            reconciliation_service: ReconciliationService::new(),
            session_service: SessionService::new(sessions.clone()),
            report_service: ReportService::new(sessions, reports),
            name_service: NameService::new(names),
        }
    }
}

/// Install the tracing subscriber. `RUST_LOG` wins over the configured filter.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    // A second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &BackendConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url, config.db_max_connections).await?;

    info!("Setting up application state");
    Ok(AppState::from_connection(db))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: HeaderValue) -> Router {
    // CORS setup to allow the wizard frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/denominations", get(io::list_denominations))
        .route("/reconciliation/summary", post(io::summarize_reconciliation))
        .route("/breakdown/total", post(io::calculate_breakdown_total))
        .route("/wizard/transition", post(io::wizard_transition))
        .route("/sessions", get(io::list_sessions).post(io::save_session))
        .route("/sessions/:id", get(io::get_session).delete(io::delete_session))
        .route("/sessions/:id/report", get(io::get_report_data))
        .route("/sessions/:id/reports", get(io::list_reports).post(io::save_report))
        .route("/reports/:id", get(io::get_report))
        .route("/names", get(io::list_names).post(io::add_name))
        .route("/names/:id", delete(io::delete_name));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}

/// Router that also serves the built frontend for paths outside `/api`
pub fn create_app(app_state: AppState, config: &BackendConfig) -> Router {
    let router = create_router(app_state, config.cors_origin.clone());
    match &config.static_dir {
        Some(dir) => {
            info!("Serving static files from {}", dir.display());
            router.fallback_service(ServeDir::new(dir))
        }
        None => router,
    }
}
