use std::sync::Arc;

use anyhow::Context;

use scanstock_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    scanstock_observability::init_with(config.log_format);

    let services = scanstock_api::app::services::build_services(&config)
        .with_context(|| format!("failed to open datastore {}", config.data_file.display()))?;
    let app = scanstock_api::app::build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr().context("listener has no local address")?,
        data_file = %config.data_file.display(),
        "listening"
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
