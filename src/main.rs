//! NIFTY radar - main entry point
//!
//! This binary provides four subcommands:
//! - run: Watch the index during market hours and send alerts
//! - price: Print the current index price
//! - targets: Print the targets currently set in the bot chat
//! - notify: Send a test message to the bot chat

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nifty_radar::config::DEFAULT_ENV_FILE;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "nifty-radar")]
#[command(about = "NIFTY 50 target radar with Telegram alerts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Key-value file with BOT_TOKEN and CHAT_ID
    #[arg(short, long, global = true, default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the radar loop (never returns)
    Run,

    /// Fetch and print the current index price
    Price,

    /// Fetch and print the current targets from the bot chat
    Targets,

    /// Send a test message to the bot chat
    Notify {
        /// Message text
        #[arg(default_value = "nifty-radar test message")]
        text: String,
    },
}

fn setup_logging(verbose: bool, command_name: &str) -> Result<()> {
    // Create logs directory
    std::fs::create_dir_all("logs")?;

    // Create log file with naming pattern: {command}_{date}.log
    let log_filename = format!(
        "{}_{}.log",
        command_name,
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
    );
    let log_path = PathBuf::from("logs").join(&log_filename);

    // Set log level - filter out noisy external crates
    let level = if verbose { "debug" } else { "info" };
    let filter_str = format!(
        "{},hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn,h2=warn",
        level
    );
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let file_appender = tracing_appender::rolling::never("logs", &log_filename);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(true);

    // File layer - same format but without ANSI colors
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_appender)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    info!("Logging initialized");
    info!("Log file: {}", log_path.display());

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let command_name = match &cli.command {
        Commands::Run => "run",
        Commands::Price => "price",
        Commands::Targets => "targets",
        Commands::Notify { .. } => "notify",
    };

    setup_logging(cli.verbose, command_name)?;

    match cli.command {
        Commands::Run => commands::run::run(cli.env_file),
        Commands::Price => commands::price::run(cli.env_file),
        Commands::Targets => commands::targets::run(cli.env_file),
        Commands::Notify { text } => commands::notify::run(cli.env_file, text),
    }
}
