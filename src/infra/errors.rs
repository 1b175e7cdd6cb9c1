// src/infra/errors.rs — Error types for workbot

use thiserror::Error;

/// Errors from session engine operations. All of them are shown to the user
/// as a reply; none are fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Session '{name}' is already active")]
    AlreadyActive { name: String },

    #[error("No active session")]
    NoActiveSession,

    #[error("Session is already paused")]
    AlreadyPaused,

    #[error("Session is not paused")]
    NotPaused,

    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
}

/// Startup and infrastructure errors.
#[derive(Error, Debug)]
pub enum WorkbotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No Telegram bot token. Set BOT_TOKEN or [telegram].bot_token in config.toml.")]
    MissingToken,

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
