//! Clear Linux Elastic Inference dashboard gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │              DASHBOARD GATEWAY               │
//!                         │                                              │
//!   Browser  ─────────────┼─▶ http server ──▶ route table ──▶ LazyView   │
//!   GET /                 │   (axum)          ("/" → index)    │         │
//!                         │                                    ▼         │
//!                         │                            views (dist dir)  │
//!                         │                                              │
//!   GET /api/routes ──────┼─▶ route table metadata (titles)              │
//!   GET /api/streams ─────┼─▶ stream directory ◀── Redis "streams" set   │
//!                         │                                              │
//!                         │  config · observability · lifecycle · tls    │
//!                         └──────────────────────────────────────────────┘
//! ```
//!
//! The live frames themselves are pushed to the SPA by the separate
//! websocket service; this process only serves pages and metadata.

use std::path::PathBuf;

use clap::Parser;

use inference_dashboard::config::{finalize, read_config};
use inference_dashboard::lifecycle::{signals, startup, Shutdown};
use inference_dashboard::observability::logging;

#[derive(Parser)]
#[command(name = "inference-dashboard")]
#[command(about = "Dashboard gateway for the Clear Linux Elastic Inference demo", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the built SPA (overrides dist.root)
    #[arg(long)]
    dist: Option<String>,

    /// Address to listen on (overrides listener.bind_address)
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = read_config(args.config.as_deref())?;
    if let Some(dist) = args.dist {
        config.dist.root = dist;
    }
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("inference-dashboard v{} starting", env!("CARGO_PKG_VERSION"));

    let config = finalize(config)?;
    tracing::info!(
        bind_address = %config.listener.bind_address,
        dist = %config.dist.root,
        broker = %config.broker.url(),
        broker_enabled = config.broker.enabled,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    let server = startup::run(config, &shutdown);
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => result?,
        _ = signals::wait_for_signal() => {
            shutdown.trigger();
            server.await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
