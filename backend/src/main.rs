use anyhow::Result;
use tracing::info;

use arqueo_backend::config::BackendConfig;
use arqueo_backend::{create_app, init_tracing, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    let config = BackendConfig::from_env()?;
    init_tracing(&config.log_filter);

    let app_state = initialize_backend(&config).await?;
    let app = create_app(app_state, &config);

    info!("Starting server on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
