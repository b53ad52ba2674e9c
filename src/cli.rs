//! Command-line interface definitions for the daily market digest.
//!
//! All arguments can be provided via command-line flags or environment
//! variables. A `.env` file is loaded before parsing, so the bot credential
//! and chat id usually live there or in the CI secret store.

use clap::Parser;

/// Command-line arguments for a single digest run.
///
/// # Examples
///
/// ```sh
/// # Credentials from the environment
/// BOT_TOKEN=123:abc CHAT_ID=-1001234567 daily_market_digest
///
/// # Print the digest instead of sending it
/// daily_market_digest --dry-run
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Telegram bot token
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    pub bot_token: Option<String>,

    /// Destination chat id (group and channel ids are negative)
    #[arg(long, env = "CHAT_ID", allow_hyphen_values = true)]
    pub chat_id: Option<String>,

    /// Per-request fetch timeout in seconds
    #[arg(long, env = "FETCH_TIMEOUT_SECS", default_value_t = 15)]
    pub fetch_timeout_secs: u64,

    /// Delay before each detail message, in milliseconds
    #[arg(long, env = "SEND_DELAY_MS", default_value_t = 1000)]
    pub send_delay_ms: u64,

    /// Print the digest to stdout instead of sending it
    #[arg(long, env = "DRY_RUN")]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "daily_market_digest",
            "--bot-token",
            "123:abc",
            "--chat-id",
            "-1001234567",
        ]);

        assert_eq!(cli.bot_token.as_deref(), Some("123:abc"));
        assert_eq!(cli.chat_id.as_deref(), Some("-1001234567"));
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_cli_negative_chat_id_forms() {
        let spaced = Cli::try_parse_from(["daily_market_digest", "--chat-id", "-1001234567", "--dry-run"])
            .unwrap();
        assert_eq!(spaced.chat_id.as_deref(), Some("-1001234567"));
        assert!(spaced.dry_run);

        let joined = Cli::try_parse_from(["daily_market_digest", "--chat-id=-42"]).unwrap();
        assert_eq!(joined.chat_id.as_deref(), Some("-42"));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "daily_market_digest",
            "--fetch-timeout-secs",
            "5",
            "--send-delay-ms",
            "0",
            "--dry-run",
        ]);

        assert_eq!(cli.fetch_timeout_secs, 5);
        assert_eq!(cli.send_delay_ms, 0);
        assert!(cli.dry_run);
    }
}
