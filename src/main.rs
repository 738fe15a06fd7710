use std::{env, net::SocketAddr};

use tracing_subscriber::EnvFilter;

use genframe::{
    app::env::Envy,
    build_router,
    generations::models::provider_config::ProviderConfig,
    AppState,
};

#[tokio::main]
async fn main() {
    // tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // environment
    let app_env = env::var("APP_ENV").unwrap_or("development".to_string());
    let _ = dotenvy::from_filename(format!(".env.{}", app_env));
    let envy = match envy::from_env::<Envy>() {
        Ok(config) => config,
        Err(e) => panic!("{:#?}", e),
    };

    // requests still fail one by one until the provider is configured
    if let Err(e) = ProviderConfig::from_envy(&envy) {
        tracing::warn!("{}", e.value().message);
    }

    let port = envy.port();
    let app = build_router(AppState::new(envy));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    if let Err(e) = axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!(%e, "server stopped");
    }
}
