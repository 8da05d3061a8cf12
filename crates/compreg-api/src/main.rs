//! # compreg-api: Binary Entry Point
//!
//! Reads configuration from the environment, connects the optional
//! collaborators (Postgres, Kafka), and serves the router.

use std::sync::Arc;

use compreg_api::auth::TokenGuard;
use compreg_api::config::AppConfig;
use compreg_api::db::companies::PgCompanyStore;
use compreg_api::state::AppState;
use compreg_api::store::{CompanyStore, MemoryStore};
use compreg_events::{EventPublisher, KafkaPublisher, LogPublisher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Structured JSON logs.
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration error: {e}");
        e
    })?;
    tracing::debug!(?config, "configuration loaded");

    let pool = compreg_api::db::init_pool(
        config.database_url.as_deref(),
        config.database_max_connections,
    )
    .await
    .map_err(|e| {
        tracing::error!("Database initialization failed: {e}");
        e
    })?;
    let store: Arc<dyn CompanyStore> = match pool {
        Some(pool) => Arc::new(PgCompanyStore::new(pool)),
        None => Arc::new(MemoryStore::new()),
    };

    let publisher: Arc<dyn EventPublisher> = match &config.kafka {
        Some(kafka) => {
            let publisher = KafkaPublisher::connect(kafka).await.map_err(|e| {
                tracing::error!("Failed to connect to Kafka at {}: {e}", kafka.bootstrap);
                e
            })?;
            tracing::info!(topic = %kafka.topic, partition = kafka.partition, "Kafka publisher connected");
            Arc::new(publisher)
        }
        None => {
            tracing::warn!("KAFKA_URL not set, notifications will only be logged");
            Arc::new(LogPublisher)
        }
    };

    let tokens = Arc::new(TokenGuard::new(&config.signing_secret, config.token_ttl_secs));
    let app = compreg_api::app(AppState::new(store, publisher, tokens));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Company registry listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
