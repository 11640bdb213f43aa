use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use gateway::{config::GatewayConfig, routes, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting gateway service");

    let config = GatewayConfig::from_env()?;
    let listen_addr = config.listen_addr.clone();
    let app_state = AppState::new(config);

    info!("Gateway service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(&listen_addr).await?;
    info!("Gateway service listening on {}", listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
