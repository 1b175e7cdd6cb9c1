// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::billing::{BillingKind, DEFAULT_PROJECT_HOURS};
use crate::core::presenter::DEFAULT_CURRENCY;
use crate::infra::errors::WorkbotError;
use crate::infra::paths;

/// Environment variables checked for the bot token, in order.
pub const TOKEN_ENV_VARS: [&str; 2] = ["WORKBOT_TELEGRAM_TOKEN", "BOT_TOKEN"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,

    #[serde(default)]
    pub billing: BillingConfig,

    #[serde(default)]
    pub reminder: ReminderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,
    /// Long-poll timeout for getUpdates.
    pub poll_timeout_secs: u64,
    /// Wait before polling again after a transport error.
    pub retry_delay_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            poll_timeout_secs: 30,
            retry_delay_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    pub currency: String,
    /// Hours a fixed-price project is assumed to take.
    pub project_hours: f64,
    /// Billing model used by the plain `/work` command.
    pub default_kind: BillingKind,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.into(),
            project_hours: DEFAULT_PROJECT_HOURS,
            default_kind: BillingKind::Hourly,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    pub enabled: bool,
    pub interval_secs: u64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 3600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> Result<Self, WorkbotError> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, WorkbotError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), WorkbotError> {
        let hours = self.billing.project_hours;
        if !hours.is_finite() || hours <= 0.0 {
            return Err(WorkbotError::Config(format!(
                "billing.project_hours must be a positive number, got {hours}"
            )));
        }
        if self.billing.currency.trim().is_empty() {
            return Err(WorkbotError::Config("billing.currency must not be empty".into()));
        }
        if self.reminder.enabled && self.reminder.interval_secs == 0 {
            return Err(WorkbotError::Config(
                "reminder.interval_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Bot token from the environment, else from the config file.
    pub fn bot_token(&self) -> Result<String, WorkbotError> {
        self.bot_token_with(|key| std::env::var(key).ok())
    }

    pub fn bot_token_with<F>(&self, env: F) -> Result<String, WorkbotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        TOKEN_ENV_VARS
            .iter()
            .filter_map(|key| env(key))
            .chain(self.telegram.bot_token.clone())
            .map(|t| t.trim().to_string())
            .find(|t| !t.is_empty())
            .ok_or(WorkbotError::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_reasonable() {
        let c = Config::default();
        assert_eq!(c.billing.currency, "MDL");
        assert!((c.billing.project_hours - 8.0).abs() < 0.001);
        assert_eq!(c.billing.default_kind, BillingKind::Hourly);
        assert!(c.reminder.enabled);
        assert_eq!(c.reminder.interval_secs, 3600);
        assert_eq!(c.telegram.poll_timeout_secs, 30);
        assert_eq!(c.logging.level, "info");
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.reminder.interval_secs, 3600);
        assert!(config.telegram.bot_token.is_none());
    }

    #[test]
    fn test_parse_partial_section() {
        let config: Config = toml::from_str(
            r#"
[billing]
default_kind = "fixed"
"#,
        )
        .unwrap();
        assert_eq!(config.billing.default_kind, BillingKind::Fixed);
        assert_eq!(config.billing.currency, "MDL");
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[telegram]
bot_token = "123:abc"
poll_timeout_secs = 50
retry_delay_secs = 2

[billing]
currency = "EUR"
project_hours = 6.5
default_kind = "hourly"

[reminder]
enabled = false
interval_secs = 900

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.telegram.bot_token.as_deref(), Some("123:abc"));
        assert_eq!(config.telegram.poll_timeout_secs, 50);
        assert_eq!(config.telegram.retry_delay_secs, 2);
        assert_eq!(config.billing.currency, "EUR");
        assert!((config.billing.project_hours - 6.5).abs() < 0.001);
        assert!(!config.reminder.enabled);
        assert_eq!(config.reminder.interval_secs, 900);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_validate_rejects_zero_project_hours() {
        let mut c = Config::default();
        c.billing.project_hours = 0.0;
        assert!(matches!(c.validate(), Err(WorkbotError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut c = Config::default();
        c.reminder.interval_secs = 0;
        assert!(c.validate().is_err());
        c.reminder.enabled = false;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[billing]\nproject_hours = 10.0").unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert!((config.billing.project_hours - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[billing]\nproject_hours = -1.0").unwrap();
        assert!(Config::load_from(file.path()).is_err());

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        writeln!(broken, "[billing\n").unwrap();
        assert!(matches!(
            Config::load_from(broken.path()),
            Err(WorkbotError::Toml(_))
        ));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load_from(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(WorkbotError::Io(_))));
    }

    #[test]
    fn test_bot_token_env_wins() {
        let mut c = Config::default();
        c.telegram.bot_token = Some("from-file".into());
        let token = c
            .bot_token_with(|key| (key == "BOT_TOKEN").then(|| "from-env".to_string()))
            .unwrap();
        assert_eq!(token, "from-env");
    }

    #[test]
    fn test_bot_token_falls_back_to_file() {
        let mut c = Config::default();
        c.telegram.bot_token = Some("from-file".into());
        assert_eq!(c.bot_token_with(|_| None).unwrap(), "from-file");
    }

    #[test]
    fn test_bot_token_missing() {
        let c = Config::default();
        assert!(matches!(
            c.bot_token_with(|_| Some("  ".into())),
            Err(WorkbotError::MissingToken)
        ));
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.reminder.interval_secs, config.reminder.interval_secs);
        assert_eq!(deserialized.billing.default_kind, config.billing.default_kind);
    }
}
