//! MoneyHog main entry point

use anyhow::Context;
use clap::Parser;
use moneyhog_api::start_server;
use moneyhog_config::{Config, ConfigError};
use moneyhog_core::Tracker;
use moneyhog_store::JsonFileStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "moneyhog")]
#[command(version = "0.1.0")]
#[command(about = "Expense, income and budget-goal tracking service", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    match Config::load(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound { .. }) => {
            let config = Config::default();
            config.validate()?;
            Ok(config)
        }
        Err(e) => {
            // The logger is not up yet
            eprintln!("{}", e.to_details());
            Err(e).with_context(|| format!("Failed to load {}", path.display()))
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config_found = args.config.exists();
    let config = load_config(&args.config)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if config_found {
        log::info!("Config loaded from {}", args.config.display());
    } else {
        log::warn!(
            "Config file {} not found, using defaults",
            args.config.display()
        );
    }

    let rt = Runtime::new()?;
    rt.block_on(async {
        let store = JsonFileStore::open(&config.data.path, config.data.create_missing)
            .await
            .with_context(|| format!("Failed to open data directory {}", config.data.path.display()))?;

        let tracker = Tracker::new(config.clone(), Arc::new(store));

        start_server(config, Arc::new(RwLock::new(tracker))).await
    })
}
