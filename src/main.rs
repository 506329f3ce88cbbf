use anyhow::Context;
use battlemarket::{api, config::Config, db::init_db, MetricsClient, Repository, SongstatsClient};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = Config::from_env().context("Configuration error")?;

    let pool = init_db(&config.database_path)
        .await
        .with_context(|| format!("Failed to initialize database at {}", config.database_path))?;

    let store = Arc::new(Repository::new(pool));
    let metrics: Arc<dyn MetricsClient> = Arc::new(SongstatsClient::new(
        reqwest::Client::new(),
        config.songstats_api_url.clone(),
        config.songstats_api_key.clone(),
    ));

    let app = api::create_router(api::AppState::new(store, metrics, &config));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
