//! dubbo-actuator
//!
//! Starts the RPC runtime described by the configuration file and serves the
//! management endpoints next to it.
//!
//! # Architecture Overview
//!
//! ```text
//!   actuator.toml ─▶ config ─▶ lifecycle::startup ─▶ ConfigContainer
//!                                                        │
//!                                                        ├─ config objects (10 kinds)
//!                                                        ├─ registries
//!                                                        ├─ protocol listeners
//!                                                        ├─ exported services
//!                                                        └─ reference manager
//!                                                        ▲
//!   HTTP ─▶ http::server ─▶ actuator router ─────────────┘
//!             GET  /actuator/dubboconfigs
//!             POST /actuator/dubboshutdown
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use dubbo_actuator::config::{load_config, ActuatorConfig};
use dubbo_actuator::http::ActuatorServer;
use dubbo_actuator::lifecycle::{signals, start_runtime, Shutdown};
use dubbo_actuator::observability;

#[derive(Parser)]
#[command(name = "dubbo-actuator")]
#[command(about = "RPC runtime with management endpoints", long_about = None)]
struct Args {
    /// Path to the TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ActuatorConfig::default(),
    };

    observability::logging::init_logging(&config.observability.log_filter);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?args.config,
        "dubbo-actuator starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let container = start_runtime(&config.dubbo).await?;

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for management requests");

    let shutdown = Shutdown::new();
    let server = ActuatorServer::new(config, container);
    let server_shutdown = shutdown.subscribe();
    let server_task = tokio::spawn(server.run(listener, server_shutdown));

    signals::wait_for_signal().await;
    shutdown.trigger();

    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
