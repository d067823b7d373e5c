//! Main entry point for the ReadySold lead server

use anyhow::Result;
use readysold_core::{create_app_with_config, run_server, AppConfig, AppState};
use std::net::SocketAddr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = match std::env::var("APP_CONFIG_FILE") {
        Ok(path) => AppConfig::load_from_file(Path::new(&path)),
        Err(_) => AppConfig::load(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    info!("Configuration loaded successfully");
    info!("Server will bind to: {}", config.bind_address());

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    let state = AppState::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialise mailer: {}", e))?;

    info!("App: {} v{}", state.app_name, state.version);
    info!(
        "Mailer: {} (confirmations {})",
        state.lead_service.mailer_name(),
        if config.email.send_confirmation { "on" } else { "off" }
    );
    info!("Fee schedule: {:.0}% with a minimum of {:.2}", state.fee_schedule.rate * 100.0, state.fee_schedule.minimum_fee);

    let app = create_app_with_config(state, &config);

    run_server(app, addr).await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let default_level = if cfg!(debug_assertions) { "debug" } else { "info" };

        format!(
            "{crate_name}={level},readysold_core={level},tower_http=debug,axum=debug",
            crate_name = env!("CARGO_CRATE_NAME").replace('-', "_"),
            level = default_level
        )
        .into()
    });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
