use clap::Parser;
use newsroom_server::ServerConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("newsroom_server=info,newsroom_core=info")),
        )
        .init();

    let config = ServerConfig::parse();
    newsroom_server::serve(&config).await
}
