use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use market::config::MarketConfig;
use market::contract::client::MarketApi;
use market::Market;
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection};
use serde::Serialize;
use url::Url;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
/// - Adds `mode=rwc` so a missing database file is created.
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok("sqlite::memory:".to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        if create_dirs {
            std::fs::create_dir_all(dir)?;
        }
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    match query {
        Some(q) if q.contains("mode=") => {
            out.push('?');
            out.push_str(q);
        }
        Some(q) => {
            out.push('?');
            out.push_str(q);
            out.push_str("&mode=rwc");
        }
        None => out.push_str("?mode=rwc"),
    }
    Ok(out)
}

/// Detect DB backend from URL scheme (sqlite/postgres).
fn detect_from_dsn(cfg: &DatabaseConfig) -> Result<DatabaseBackend> {
    let raw = cfg.url.trim();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }

    let url = Url::parse(raw).map_err(|e| anyhow!("Invalid database DSN '{}': {}", raw, e))?;

    match url.scheme() {
        "sqlite" | "sqlite3" => Ok(DatabaseBackend::Sqlite),
        "postgres" | "postgresql" => Ok(DatabaseBackend::Postgres),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

/// MiniMarket backend - schema management and read-only listings
#[derive(Parser)]
#[command(name = "market-server")]
#[command(about = "MiniMarket backend - schema management and catalog listings")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,
    /// Check configuration
    Check,
    /// List categories as JSON
    Categories,
    /// List inventory as JSON, optionally filtered
    Inventory {
        /// Only records whose product name contains this text
        #[arg(long, conflicts_with = "category")]
        name: Option<String>,
        /// Only records whose product belongs to this category id
        #[arg(long)]
        category: Option<i64>,
    },
    /// List sales receipts as JSON
    Receipts,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config/app
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.home_dir));
    tracing::info!("market-server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Migrate) {
        Commands::Check => check_config(&config),
        Commands::Migrate => {
            start_market(&config).await?;
            println!("Migrations applied");
            Ok(())
        }
        Commands::Categories => {
            let market = start_market(&config).await?;
            let items = market.client().list_categories(None, None).await?;
            print_json(&items)
        }
        Commands::Inventory { name, category } => {
            let market = start_market(&config).await?;
            let client = market.client();
            let items = match (name, category) {
                (Some(term), _) => client.search_inventory_by_name(&term).await?,
                (None, Some(category_id)) => client.inventory_by_category(category_id).await?,
                (None, None) => client.list_inventory(None, None).await?,
            };
            print_json(&items)
        }
        Commands::Receipts => {
            let market = start_market(&config).await?;
            let items = market.client().list_receipts(None, None).await?;
            print_json(&items)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn connect(config: &AppConfig) -> Result<DatabaseConnection> {
    let db_config = config
        .database
        .clone()
        .ok_or_else(|| anyhow!("Database configuration is missing"))?;
    let backend = detect_from_dsn(&db_config)?;

    // Base dir for resolving relative sqlite paths (already absolute & created)
    let base_dir = PathBuf::from(&config.home_dir);
    let dsn = match backend {
        DatabaseBackend::Sqlite => absolutize_sqlite_dsn(db_config.url.trim(), &base_dir, true)?,
        _ => db_config.url.trim().to_owned(),
    };

    let mut opts = ConnectOptions::new(dsn.clone());
    opts.acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    if let Some(max) = db_config.max_conns {
        opts.max_connections(max);
    }

    tracing::info!("Connecting to database: {}", dsn);
    let conn = Database::connect(opts)
        .await
        .with_context(|| format!("failed to connect to {dsn}"))?;

    if backend == DatabaseBackend::Sqlite {
        if let Some(ms) = db_config.busy_timeout_ms {
            conn.execute_unprepared(&format!("PRAGMA busy_timeout = {ms}"))
                .await
                .context("failed to set busy_timeout")?;
        }
    }
    tracing::info!("Connected DB backend: {:?}", conn.get_database_backend());
    Ok(conn)
}

async fn start_market(config: &AppConfig) -> Result<Market> {
    let market_cfg: MarketConfig = config.module_config("market")?;
    let conn = connect(config).await?;
    Market::start(conn, &market_cfg).await
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    if let Some(db) = &config.database {
        detect_from_dsn(db)?;
    }
    let _: MarketConfig = config.module_config("market")?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
