use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dua_bot::config::{BotConfig, ConfigSource, CONFIG_ENV, STORE_PATH_ENV, TOKEN_ENV};
use dua_bot::{runner, TelegramClient};
use dua_intake::IntakeService;
use dua_store::RecordStore;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "dua-bot")]
#[command(about = "Telegram bot collecting dua requests", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Telegram and serve conversations until Ctrl-C
    Run(RunArgs),

    /// Check the configuration and print what the bot would use
    Validate(ValidateArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Config file (overrides DUA_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Record table path (overrides DUA_STORE_PATH and the config file)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Keep records in memory only
    #[arg(long, conflicts_with = "store")]
    ephemeral: bool,
}

#[derive(Args)]
struct ValidateArgs {
    /// Config file (overrides DUA_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Run(args) => run_bot(args).await,
        Commands::Validate(args) => validate(args),
    }
}

fn load_config(flag: Option<PathBuf>) -> Result<BotConfig> {
    let source = ConfigSource::resolve(flag, env::var(CONFIG_ENV).ok());
    let config = BotConfig::load(&source)?;
    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", source.path().display()))?;
    Ok(config)
}

async fn run_bot(args: RunArgs) -> Result<()> {
    let mut config = load_config(args.config)?;
    config.override_store_path(args.store, env::var(STORE_PATH_ENV).ok());

    let token = env::var(TOKEN_ENV)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .with_context(|| format!("{TOKEN_ENV} is not set"))?;

    let store = if args.ephemeral {
        log::warn!("Running with an in-memory store; records are lost on exit");
        RecordStore::in_memory()
    } else {
        let store = RecordStore::open(&config.store_path);
        let table = store
            .load()
            .with_context(|| format!("Failed to open store {}", config.store_path.display()))?;
        log::info!(
            "Loaded {} records from {}",
            table.len(),
            config.store_path.display()
        );
        store
    };

    let client = TelegramClient::new(
        &config.api_base,
        &token,
        config.buttons_per_row,
        Duration::from_secs(config.poll_timeout_secs),
    )?;
    let me = client
        .get_me()
        .await
        .context("Failed to reach the Bot API; check BOT_TOKEN")?;
    log::info!(
        "Connected as @{}",
        me.username.as_deref().unwrap_or("<unnamed>")
    );
    if config.broadcast_chat_id.is_none() {
        log::info!("No broadcast_chat_id configured; anonymised summaries are skipped");
    }

    let service = IntakeService::new(
        Arc::new(config.catalog()?),
        config.policy(),
        store,
        client,
        config.dispatcher(),
    )?;
    runner::run(service, config.poll_timeout_secs).await
}

fn validate(args: ValidateArgs) -> Result<()> {
    let config = load_config(args.config)?;
    let catalog = config.catalog()?;

    println!(
        "topics: {} ({} pages of up to {})",
        catalog.len(),
        catalog.page_count(),
        catalog.page_size()
    );
    for entry in catalog.entries() {
        println!("  {:<24} {}", entry.label, entry.text);
    }
    println!("store: {}", config.store_path.display());
    println!("retention: {} days", config.retention_days);
    println!("require selection: {}", config.require_selection);
    match config.broadcast_chat_id {
        Some(chat) => println!("broadcast: {chat}"),
        None => println!("broadcast: disabled"),
    }
    Ok(())
}
