// src/cli/mod.rs — CLI definition (clap derive)

pub mod run;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "workbot", about = "Chat bot for tracking billable work sessions", version)]
pub struct Cli {
    /// Config file path
    #[arg(long)]
    pub config: Option<String>,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Commands {
    /// Run the bot (default)
    Run,
    /// Check the Telegram bot token
    Check,
    /// Print the effective configuration
    Config,
}
