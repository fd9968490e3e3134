//! scenelens - semantic element introspection bridge
//!
//! Main entry point for the scenelens CLI and line-protocol server.

mod cli;
mod server;

use std::path::Path;

use clap::Parser;
use tracing::{info, warn};

use scenelens_config::{Config, ConfigLoader, ConfigValidator};

use crate::cli::{Cli, Commands};
use crate::server::{build_dispatcher, init_tracing, load_viewport, run_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = ConfigLoader::load_or_default(&cli.config)?;
    init_tracing(&config.logging)?;

    match cli.command {
        None => serve(config, None, None, None, false).await,
        Some(Commands::Serve {
            host,
            port,
            scene,
            dry_run,
        }) => serve(config, host, port, scene.as_deref(), dry_run).await,
        Some(Commands::Query { scene, filter }) => query(&config, scene.as_deref(), filter).await,
        Some(Commands::CheckConfig) => check_config(&cli.config, &config),
    }
}

async fn serve(
    config: Config,
    host: Option<String>,
    port: Option<u16>,
    scene: Option<&Path>,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = ConfigValidator::validate(&config);
    for warning in &report.warnings {
        warn!("Config warning at {}: {}", warning.path, warning.message);
    }
    if let Some(err) = report.errors.first() {
        return Err(format!("Invalid config at {}: {}", err.path, err.message).into());
    }

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    let viewport = load_viewport(scene)?;
    let dispatcher = build_dispatcher(&config, viewport, dry_run)?;
    run_server(&host, port, dispatcher).await
}

async fn query(
    config: &Config,
    scene: Option<&Path>,
    filter: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let viewport = load_viewport(scene)?;
    let dispatcher = build_dispatcher(config, viewport, true)?;

    let mut request = serde_json::json!({"action": "find_clickable"});
    if let Some(filter) = filter {
        request["filter"] = serde_json::Value::String(filter);
    }
    let response = dispatcher.handle_value(request).await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn check_config(path: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let report = ConfigValidator::validate(config);
    info!(path = %path.display(), "Checked configuration");

    for warning in &report.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for err in &report.errors {
        println!("error: {}: {}", err.path, err.message);
    }

    if report.is_valid() {
        println!("{}: ok", path.display());
        Ok(())
    } else {
        Err(format!("{} error(s) in {}", report.errors.len(), path.display()).into())
    }
}
