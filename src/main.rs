use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rust_leads_api::config::Config;
use rust_leads_api::db::Database;
use rust_leads_api::handlers::{self, AppState};

/// Main entry point for the application.
///
/// Initializes logging, configuration, and the database pool, brings the
/// schema up to date, then serves the HTTP routes until a shutdown signal
/// arrives, at which point the pool is closed explicitly.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_leads_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize database connection pool
    let db = Database::new(&config.database_url).await?;
    tracing::info!("Database connection pool established");

    // Bring the leads schema up to date before serving traffic
    sqlx::migrate!().run(&db.pool).await?;
    tracing::info!("Database migrations applied");

    // Build application state
    let app_state = Arc::new(AppState {
        db: db.pool.clone(),
        config: config.clone(),
    });

    // Configure rate limiter: 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .unwrap(),
    );

    // API routes behind the body limit and rate limiting layers
    let api_routes = Router::new()
        .route(
            "/api/users",
            get(handlers::list_leads).post(handlers::create_lead),
        )
        .route("/api/users/leads/:source", get(handlers::leads_by_source))
        .route(
            "/api/users/companies/:size",
            get(handlers::leads_by_company_size),
        )
        .route(
            "/api/users/:id",
            get(handlers::get_lead)
                .put(handlers::update_lead)
                .delete(handlers::delete_lead),
        )
        .layer(
            ServiceBuilder::new()
                // Request size limit: 10MB max payload
                .layer(RequestBodyLimitLayer::new(10 * 1024 * 1024))
                // Rate limiting: 10 req/sec per IP, burst of 20
                .layer(GovernorLayer {
                    config: governor_conf,
                }),
        );

    // Banner and health check bypass the rate limiter
    let app = Router::new()
        .route("/", get(handlers::service_banner))
        .route("/health", get(handlers::health))
        .merge(api_routes)
        .fallback(handlers::not_found)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Drain the pool before exiting
    db.close().await;
    tracing::info!("Database pool closed, shutting down");

    Ok(())
}

/// Resolves when SIGINT or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
