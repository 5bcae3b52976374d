//! ShareIt Gateway - validates requests and forwards them to the server

use std::net::SocketAddr;

use anyhow::Context;
use tower_http::cors::{Any, CorsLayer};

use shareit::{
    config::AppConfig,
    gateway::{self, GatewayState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    config.logging.init_tracing();

    tracing::info!(
        server_url = %config.gateway.server_url,
        "Starting ShareIt Gateway v{}",
        env!("CARGO_PKG_VERSION")
    );

    let addr = SocketAddr::new(
        config.gateway.host.parse().context("Invalid host address")?,
        config.gateway.port,
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = gateway::router(GatewayState::new(config.gateway.server_url)).layer(cors);

    tracing::info!("Gateway listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
