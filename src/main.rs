use clap::Parser;
use dog_records::config::ServiceConfig;
use dog_records::dogs::handlers::router;
use dog_records::dogs::store::DogStore;
use dog_records::storage::memory::MemoryTable;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // 1. Storage layer:
    let table = Arc::new(MemoryTable::new(&config.table));
    tracing::info!("Using table {}", table.name());

    // 2. Record store:
    let store = Arc::new(DogStore::new(table, &config.partition));
    tracing::info!("Serving records from partition {}", store.partition());

    // 3. HTTP Router:
    let app = router(store);

    // 4. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
