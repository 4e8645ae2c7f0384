//! Server settings, read from flags with environment fallbacks.

use std::net::SocketAddr;

use clap::Parser;
use newsroom_core::DEFAULT_ARCHIVE_HOST;

#[derive(Parser, Debug, Clone)]
#[command(name = "newsroom-server", version, about = "HTTP API for the newsroom CMS")]
pub struct ServerConfig {
    /// PostgreSQL connection URL; without one the server keeps everything in memory
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "DB_POOL_SIZE", default_value = "16")]
    pub pool_size: usize,

    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    pub bind_addr: SocketAddr,

    /// Enables the AI formatter
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_api_key: Option<String>,

    /// Bearer token required on /api routes
    #[arg(long, env = "ADMIN_TOKEN", hide_env_values = true)]
    pub admin_token: Option<String>,

    /// Webhook notified with the public paths an import invalidated
    #[arg(long, env = "REVALIDATE_URL")]
    pub revalidate_url: Option<String>,

    #[arg(long, env = "REVALIDATE_SECRET", hide_env_values = true)]
    pub revalidate_secret: Option<String>,

    /// Public origin of the site, used for canonical URLs and the sitemap
    #[arg(long, env = "SITE_ORIGIN", default_value = "https://ghanainsider.com")]
    pub site_origin: String,

    #[arg(long, env = "ARCHIVE_HOST", default_value = DEFAULT_ARCHIVE_HOST)]
    pub archive_host: String,

    /// Snapshot fetch timeout in seconds
    #[arg(long, env = "FETCH_TIMEOUT", default_value = "30")]
    pub fetch_timeout: u64,

    /// Whole-request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT", default_value = "180")]
    pub request_timeout: u64,
}
