//! Karibu Server - Visitor Check-in Management System
//!
//! REST API server for the reception kiosk and admin dashboard.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use karibu_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::{scheduler::AutoCheckoutScheduler, Services},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("karibu_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Karibu Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.auth.clone(), config.kiosk.clone());

    // Bootstrap the default admin account on an empty installation
    services
        .auth
        .ensure_default_admin()
        .await
        .expect("Failed to ensure default admin account");

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Midnight auto-checkout task, owned by the composition root
    AutoCheckoutScheduler::new(state.services.visits.clone()).spawn();

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Public kiosk
        .route("/visitors/check-in", post(api::checkin::check_in))
        .route("/visitors/check-out", post(api::checkin::check_out))
        .route("/settings", get(api::settings::get_settings))
        // Admin session
        .route("/admin/login", post(api::auth::login))
        .route("/admin/logout", post(api::auth::logout))
        .route("/admin/me", get(api::auth::me))
        // Visitors
        .route("/admin/visitors", get(api::visitors::list_visitors))
        .route("/admin/visitors/:id", get(api::visitors::get_visitor))
        .route("/admin/visitors/:id", put(api::visitors::update_visitor))
        .route("/admin/visitors/:id/reports", get(api::reports::list_visitor_reports))
        .route("/admin/verify-visitor", post(api::visitors::verify_visitor))
        // Trash
        .route("/admin/trash", get(api::visitors::list_trash))
        .route("/admin/delete-visitor/:id", delete(api::visitors::delete_visitor))
        .route("/admin/restore-visitor/:id", post(api::visitors::restore_visitor))
        .route("/admin/permanently-delete/:id", delete(api::visitors::permanently_delete_visitor))
        .route("/admin/empty-bin", delete(api::visitors::empty_bin))
        // Visits
        .route("/admin/visits", get(api::visits::list_visits))
        .route("/admin/check-out-visitor", post(api::visits::check_out_visitor))
        .route("/admin/auto-checkout", post(api::visits::auto_checkout))
        .route("/admin/set-visit-partner", post(api::visits::set_visit_partner))
        // Reports
        .route("/admin/reports", get(api::reports::list_reports))
        .route("/admin/reports", post(api::reports::create_report))
        .route("/admin/reports/:id", get(api::reports::get_report))
        .route("/admin/reports/:id", put(api::reports::update_report))
        // Stats, audit trail, settings
        .route("/admin/stats", get(api::stats::get_stats))
        .route("/admin/system-logs", get(api::system_logs::list_system_logs))
        .route("/admin/settings", put(api::settings::update_settings))
        // Live notifications
        .route("/admin/ws", get(api::ws::check_in_events))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api", api_routes)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
