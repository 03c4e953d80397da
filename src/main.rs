use std::sync::Arc;

use hotlist_api::{
    config::Config,
    routes::{create_router, AppState},
    services::{
        providers::{
            CatalogSearch, DoubanProvider, RatingIndexProvider, RatingSource, TmdbProvider,
            TrendingCatalog,
        },
        DiscoverService,
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hotlist_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let trending: Arc<dyn TrendingCatalog> =
        Arc::new(DoubanProvider::new(config.douban_api_url.clone()));
    let catalog: Arc<dyn CatalogSearch> = Arc::new(TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
    ));
    let ratings: Arc<dyn RatingSource> =
        Arc::new(RatingIndexProvider::new(config.rating_api_url.clone()));

    let discover = Arc::new(DiscoverService::new(
        trending,
        catalog,
        config.match_concurrency,
    ));

    let state = Arc::new(AppState { discover, ratings });
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "hotlist-api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
