use insta_insights::{router, AppConfig, AppState, BackendClient, CollectionContext, CollectionStore};
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::from_env()?;

    let store = CollectionStore::new(config.data_path.clone());
    let collection = CollectionContext::from_stored(&store.get().await);
    match collection.current().await {
        Some(name) => info!(collection = %name, "restored collection"),
        None => info!("no collection selected yet"),
    }

    let client = BackendClient::new(
        config.posts_api_base.clone(),
        config.ingest_api_base.clone(),
        config.scoring_api_base.clone(),
        config.ingest_timeout,
    )?;
    let app = router(AppState::new(client, store, collection));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(
        posts = %config.posts_api_base,
        scoring = %config.scoring_api_base,
        "listening on http://{addr}"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
