mod domain;
mod clients;
mod config;
mod http;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod product_actor;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use crate::app_system::{setup_tracing, ProductSystem};
use crate::config::ServiceConfig;
use crate::http::{shutdown_signal, AppState, HttpServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::parse();

    // Setup tracing once for the entire application
    setup_tracing();

    info!(
        bind = %config.bind,
        buffer_size = config.buffer_size,
        seed = !config.no_seed,
        "Starting product service"
    );

    let system = ProductSystem::start(&config).await?;

    let listener = TcpListener::bind(&config.bind).await?;
    let server = HttpServer::new(AppState {
        products: system.product_client.clone(),
    });
    server.run(listener, shutdown_signal()).await?;

    system.shutdown().await?;

    info!("Product service stopped");
    Ok(())
}
