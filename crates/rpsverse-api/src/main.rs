//! rpsverse API server entry point.

use std::sync::{Arc, Mutex};

use rpsverse_api::config::AppConfig;
use rpsverse_api::error::AppError;
use rpsverse_api::state::AppState;
use rpsverse_api::{routes, telemetry};
use rpsverse_classifier::{DisconnectedClassifier, HttpPlayClassifier};
use rpsverse_core::classifier::PlayClassifier;
use rpsverse_core::clock::{Clock, SystemClock};
use rpsverse_core::repository::SnapshotRepository;
use rpsverse_core::rng::{DeterministicRng, StdDeterministicRng};
use rpsverse_snapshot_store::{InMemorySnapshotRepository, PgSnapshotRepository};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    let tracer_provider = telemetry::init(config.otlp_endpoint.as_deref())?;

    info!("Starting rpsverse API server");

    let snapshot_repository = snapshot_repository(&config).await?;
    let classifier = classifier(&config);
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(SystemClock);
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(
        config
            .rng_seed
            .map_or_else(StdDeterministicRng::from_os_rng, StdDeterministicRng::seeded),
    ));

    let app_state = AppState::new(clock, rng, snapshot_repository, classifier);

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = routes::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.listen_addr()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(Err(e)) = tracer_provider.map(|provider| provider.shutdown()) {
        warn!(error = %e, "failed to flush traces");
    }

    Ok(())
}

async fn snapshot_repository(config: &AppConfig) -> Result<Arc<dyn SnapshotRepository>, AppError> {
    let Some(database_url) = config.database_url.as_deref() else {
        warn!("DATABASE_URL not set; snapshots are kept in memory");
        return Ok(Arc::new(InMemorySnapshotRepository::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    let repository = PgSnapshotRepository::new(pool);
    repository.ensure_schema().await?;
    Ok(Arc::new(repository))
}

fn classifier(config: &AppConfig) -> Arc<dyn PlayClassifier> {
    let Some(endpoint) = config.classifier_url.as_deref() else {
        warn!("CLASSIFIER_URL not set; play detection is disabled");
        return Arc::new(DisconnectedClassifier::new("no classifier endpoint configured"));
    };

    match HttpPlayClassifier::new(endpoint, config.classifier_timeout) {
        Ok(classifier) => {
            info!(endpoint, timeout = ?config.classifier_timeout, "classifier configured");
            Arc::new(classifier)
        }
        Err(e) => {
            warn!(error = %e, "classifier client unavailable; play detection is disabled");
            Arc::new(DisconnectedClassifier::new(e.to_string()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
