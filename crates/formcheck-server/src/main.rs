use anyhow::{Context, Result};
use formcheck_server::{router, Config, CUSTOMER_PATH};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formcheck_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load_default()?.with_env_overrides()?;
    tracing::info!("Serving wasm package from {}", config.assets.static_dir);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Starting server on http://{}{}", addr, CUSTOMER_PATH);

    axum::serve(listener, router(&config))
        .await
        .context("Server error")?;

    Ok(())
}
