//! roster-web - Person and group roster service
//!
//! Lists persons, adds a person to a group and searches by person or group
//! name, backed by a local SQLite database.

use anyhow::{Context, Result};
use clap::Parser;
use roster_common::config::{database_path, resolve_root_folder, TomlConfig};
use roster_common::db::{init_database, seed_groups};
use roster_web::{build_router, AppState};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "roster-web", version, about = "Person and group roster service")]
struct Args {
    /// Path to TOML configuration file
    #[arg(long, env = "ROSTER_CONFIG")]
    config: Option<PathBuf>,

    /// Root folder holding the database
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// HTTP bind address (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "ROSTER_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is loaded first so its log level can seed the filter; its
    // source is reported once the subscriber is installed
    let (config, config_source) = TomlConfig::load(args.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .context("Invalid log level")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Log build identification immediately after tracing init
    info!(
        "Starting roster-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    config_source.log();

    let root_folder = resolve_root_folder(args.root_folder.as_deref(), &config);
    let db_path = database_path(&root_folder, &config);
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path)
        .await
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    seed_groups(&pool, &config.seed_groups).await?;

    let state = AppState::from_pool(pool);
    let app = build_router(state);

    let host = args.host.unwrap_or(config.host);
    let port = args.port.unwrap_or(config.port);
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("roster-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
