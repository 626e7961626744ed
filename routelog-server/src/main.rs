// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  routelog: request logging demo server
//
//  HTTP:    axum on tokio
//  Logging: RequestLogger middleware (text / JSON access lines)
//  Config:  optional YAML file + ROUTELOG_ env overrides
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use clap::Parser;
use routelog_core::config::{LogFormat, RouteLogConfig};
use routelog_observability::{LoggerOption, LoggerOptions, RequestLogger, resolve};
use routelog_server::server::{self, AppState};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "routelog", version, about = "Request logging demo server")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "routelog.yaml")]
    config: PathBuf,

    /// Log level for the server's own diagnostics
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Access log format (text or json); overrides the config file
    #[arg(long)]
    format: Option<LogFormat>,

    /// Listen address; overrides the config file
    #[arg(long)]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ── Tracing ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_target(false)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "routelog starting");

    // ── Config ──
    let mut config = if cli.config.exists() {
        info!(path = %cli.config.display(), "Loading config file");
        RouteLogConfig::load(&cli.config)?
    } else {
        info!("No config file found, using defaults");
        RouteLogConfig::default()
    };
    if let Some(addr) = cli.addr {
        config.server.addr = addr;
    }

    // ── Request logger ──
    let overrides = cli.format.map(LoggerOption::Format);
    let options = resolve(LoggerOptions::from_config(&config.logger)?, overrides);
    let logger = RequestLogger::new(options);
    info!(format = %logger.format(), color = logger.is_terminal(), "Request logger ready");

    server::start(&config.server, AppState::new(logger)).await
}
