// src/main.rs — workbot entry point

use clap::Parser;

use workbot::cli::run as commands;
use workbot::cli::{Cli, Commands};
use workbot::infra::config::Config;
use workbot::infra::logger;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    logger::init_logging(level)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => commands::run_bot(&config).await,
        Commands::Check => commands::check_token(&config).await,
        Commands::Config => commands::show_config(&config),
    }
}
