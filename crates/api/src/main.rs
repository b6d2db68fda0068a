use std::sync::Arc;

use anyhow::Context;

use folio_infra::config::{Config, hydrate_env_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` may set RUST_LOG, so it is merged before the subscriber exists.
    let env_file = hydrate_env_file().context("failed to load .env")?;

    folio_observability::init();

    if let Some(path) = &env_file {
        tracing::info!(path = %path.display(), "loaded .env");
    }

    let config = Config::from_env().context("failed to load configuration")?;

    let services = Arc::new(folio_api::app::build_services(&config).await);
    let app = folio_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind 0.0.0.0:{}", config.port))?;

    tracing::info!(port = config.port, "Server running on port {}", config.port);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
