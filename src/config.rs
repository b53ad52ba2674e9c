//! Validated run configuration.
//!
//! [`Config`] is built once in `main` from the parsed [`Cli`] and handed by
//! reference to the components that need it.

use crate::cli::Cli;
use crate::error::ConfigError;
use std::time::Duration;

/// Where the digest goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Send through the Telegram Bot API.
    Telegram { bot_token: String, chat_id: String },
    /// Print every message to stdout.
    DryRun,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub delivery: Delivery,
    pub fetch_timeout: Duration,
    pub send_delay: Duration,
}

impl Config {
    /// Validate the command line into a run configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when the bot token or chat id is
    /// absent or blank outside of dry-run mode, and
    /// [`ConfigError::InvalidValue`] for a zero fetch timeout.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        if cli.fetch_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "FETCH_TIMEOUT_SECS",
                reason: "must be at least 1 second".to_string(),
            });
        }

        let delivery = if cli.dry_run {
            Delivery::DryRun
        } else {
            Delivery::Telegram {
                bot_token: required(cli.bot_token.as_deref(), "BOT_TOKEN")?,
                chat_id: required(cli.chat_id.as_deref(), "CHAT_ID")?,
            }
        };

        Ok(Self {
            delivery,
            fetch_timeout: Duration::from_secs(cli.fetch_timeout_secs),
            send_delay: Duration::from_millis(cli.send_delay_ms),
        })
    }

    /// Destination identifier handed to the sender.
    pub fn destination(&self) -> &str {
        match &self.delivery {
            Delivery::Telegram { chat_id, .. } => chat_id,
            Delivery::DryRun => "stdout",
        }
    }
}

fn required(value: Option<&str>, field: &'static str) -> Result<String, ConfigError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ConfigError::MissingField { field }),
    }
}
