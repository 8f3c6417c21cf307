//! CardCraft REST server binary.

use cardcraft_server::{AppState, Config};
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cardcraft_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::parse();
    let addr = config.bind;
    let public_url = config.public_url.clone();
    if config.sample_data {
        info!("Seeding sample cards");
    }

    let app = cardcraft_server::app(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("CardCraft server listening on {}", addr);
    info!("Share links point at {}", public_url);
    axum::serve(listener, app).await
}
