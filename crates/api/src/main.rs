use std::sync::Arc;

use anyhow::Context;

use storefront_api::{app::AppServices, config::ApiConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let config = ApiConfig::from_env();
    config.validate().context("invalid configuration")?;

    let services = Arc::new(AppServices::from_config(&config).with_context(|| {
        format!("failed to load catalog from {}", config.catalog_path.display())
    })?);

    if let Some(every) = config.reload_interval {
        tracing::info!(every_secs = every.as_secs(), "periodic catalog reload enabled");
        services.spawn_reload_task(every);
    }

    let app = storefront_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.socket_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.socket_addr()))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
