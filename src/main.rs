//! Binary entry point: stdio transport, logging to stderr, signal handling.

use anyhow::Result;
use rmcp::ServiceExt;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use redshift_mcp_server::{Config, RedshiftMcpServer};

/// Initialize tracing. stdout carries the protocol, so all log output goes
/// to stderr.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,redshift_mcp_server=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    eprintln!(
        "Redshift MCP Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Server panic: {panic_info}");
    }));

    let config = Config::load()?;
    info!("Using default schema '{}'", config.default_schema);

    // Connection failure here is fatal; the process exits with the error.
    let server = RedshiftMcpServer::new(config).await?;
    eprintln!(
        "Connected to {}; serving MCP on stdio",
        server.database().display_host()
    );

    let service = server.serve(rmcp::transport::stdio()).await?;

    tokio::select! {
        quit = service.waiting() => match quit {
            Ok(reason) => info!("Service stopped: {:?}", reason),
            Err(e) => error!("Service error: {}", e),
        },
        _ = shutdown_signal() => info!("Shutdown signal received"),
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves when Ctrl+C or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
