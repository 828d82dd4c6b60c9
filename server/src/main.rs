use anyhow::Result;
use axum::Router;
use clap::Parser;
use engine::{EngineConfig, SimilarityStrategy, DEFAULT_K};
use server::{build_app, AppSettings};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Catalog file or directory (JSON/JSONL); the demo catalog when omitted
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Number of recommendations when a request omits k
    #[arg(long, default_value_t = DEFAULT_K)]
    default_k: usize,
    /// dense or lazy
    #[arg(long, default_value = "dense")]
    strategy: SimilarityStrategy,
    #[arg(long, default_value_t = 1)]
    min_term_length: usize,
    /// Token required by /admin/rebuild
    #[arg(long, env = "ADMIN_TOKEN", hide_env_values = true)]
    admin_token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let settings = AppSettings {
        catalog: args.catalog,
        engine: EngineConfig { strategy: args.strategy, min_term_length: args.min_term_length, ..EngineConfig::default() },
        default_k: args.default_k,
        admin_token: args.admin_token,
    };
    let app: Router = build_app(settings)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
