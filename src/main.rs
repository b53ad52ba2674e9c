//! # Daily Market Digest
//!
//! Collects the day's economy, stock, commodity and crypto headlines plus the
//! major market indices, and delivers them to a Telegram chat as one summary
//! message followed by one linked detail message per category.
//!
//! ## Usage
//!
//! ```sh
//! BOT_TOKEN=123:abc CHAT_ID=-1001234567 daily_market_digest
//! daily_market_digest --dry-run
//! ```
//!
//! ## Architecture
//!
//! A run flows strictly one way:
//! 1. **Collection**: all six categories are fetched and extracted concurrently;
//!    a failing source only empties its own category
//! 2. **Formatting**: the collected result is rendered into a summary and
//!    per-category detail messages
//! 3. **Dispatch**: messages are sent in a fixed order with a delay between
//!    them; only a failed summary fails the run

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod collector;
mod config;
mod digest;
mod dispatch;
mod error;
mod fetch;
mod models;
mod scrapers;
mod sender;
mod utils;

use cli::Cli;
use config::{Config, Delivery};
use dispatch::DispatchSequencer;
use fetch::HttpFetcher;
use sender::{ConsoleSender, TelegramSender};
use utils::mask_identifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env may carry RUST_LOG, so load it before the subscriber.
    let dotenv = dotenvy::dotenv();

    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    if let Err(e) = dotenv {
        debug!(error = %e, "No .env file loaded");
    }
    let args = Cli::parse();
    let config = match Config::from_cli(&args) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    info!(
        destination = %mask_identifier(config.destination(), 4),
        fetch_timeout = ?config.fetch_timeout,
        send_delay = ?config.send_delay,
        "daily_market_digest starting up"
    );

    // ---- Collect ----
    let fetcher = HttpFetcher::new(config.fetch_timeout)?;
    let result = collector::collect_all(&fetcher).await;

    // ---- Dispatch ----
    let today = Local::now().date_naive();
    let report = match &config.delivery {
        Delivery::Telegram { bot_token, chat_id } => {
            let sender = TelegramSender::new(bot_token.as_str())?;
            DispatchSequencer::new(sender, chat_id.as_str(), config.send_delay)
                .send_digest(&result, today)
                .await?
        }
        Delivery::DryRun => {
            DispatchSequencer::new(ConsoleSender, config.destination(), config.send_delay)
                .send_digest(&result, today)
                .await?
        }
    };

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        details_sent = report.details_sent,
        details_failed = report.details_failed,
        details_skipped = report.details_skipped,
        "Execution complete"
    );

    Ok(())
}
