//! OCR-D Dispatch - Main Entry Point
//! JSON-RPC server accepting processor jobs and answering processor descriptions

mod config;

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Import workspace crates
use config::DaemonConfig;
use ocrd_dispatch_api_rpc::{RpcServer, RpcServerConfig};
use ocrd_dispatch_core::application::DispatchService;
use ocrd_dispatch_core::port::time_provider::SystemTimeProvider;
use ocrd_dispatch_core::port::ProcessorCatalog;
use ocrd_dispatch_infra_local::{OcrdToolCatalog, SpoolDispatcher};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn init_logging(log_format: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("ocrd_dispatch=info"))?;

    match log_format {
        "json" => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging (config loading may already warn)
    let log_format =
        std::env::var("OCRD_DISPATCH_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    init_logging(&log_format)?;

    // 2. Load configuration
    let config = DaemonConfig::from_env();

    info!("OCR-D Dispatch v{} starting...", VERSION);
    info!(
        project_root = %config.project_root.display(),
        spool_dir = %config.spool_dir.display(),
        check_folders = config.check_folders,
        "Configuration loaded"
    );

    // 3. Load processor catalog
    let mut catalog = OcrdToolCatalog::load(config.tool_files.as_slice())
        .await
        .map_err(|e| anyhow::anyhow!("Processor catalog load failed: {}", e))?;
    if let Some(default_processor) = &config.default_processor {
        catalog = catalog.with_default(default_processor.clone());
    }
    if catalog.is_empty() {
        warn!("No ocrd-tool.json loaded (OCRD_DISPATCH_TOOLS), processors are not verified");
    }
    let catalog: Arc<dyn ProcessorCatalog> = Arc::new(catalog);

    // 4. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let mut dispatcher = SpoolDispatcher::new(
        config.project_root.clone(),
        config.spool_dir.clone(),
        time_provider,
    )
    .with_folder_checks(config.check_folders);
    if !config.tool_files.is_empty() {
        dispatcher = dispatcher.with_catalog(catalog.clone());
    }

    let service = Arc::new(DispatchService::new(Arc::new(dispatcher), catalog));

    // 5. Start JSON-RPC server
    let rpc_config = RpcServerConfig {
        host: config.rpc_host.clone(),
        port: config.rpc_port,
    };
    let (addr, rpc_handle) = RpcServer::new(rpc_config, service)
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    info!(addr = %addr, "System ready. Waiting for jobs...");
    info!("Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    rpc_handle.stopped().await;

    info!("Shutdown complete.");

    Ok(())
}
