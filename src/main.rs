use std::sync::Arc;

use marquee::{
    api::{create_router, AppState},
    config::Config,
    models::User,
    services::{AuthContext, HttpRecommender, RecommenderApi},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("marquee=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let api = Arc::new(HttpRecommender::from_config(&config)?);
    match api.health().await {
        Ok(health) => tracing::info!(
            api = %api.base_url(),
            status = %health.status,
            movies = ?health.movies,
            "Recommendation API reachable"
        ),
        Err(e) => tracing::warn!(api = %api.base_url(), error = %e, "Recommendation API not reachable yet"),
    }

    let seed = match config.default_user.as_deref() {
        Some(name) => Some(User::new(name, None)?),
        None => None,
    };
    let auth = AuthContext::init(seed);

    let state = AppState::new(api, auth.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %config.bind_address(), "View server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    auth.teardown().await;
    tracing::info!("View server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
