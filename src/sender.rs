//! Outbound message delivery.
//!
//! [`MessageSender`] is the send capability used by the dispatch sequencer.
//! [`TelegramSender`] talks to the Telegram Bot API; [`ConsoleSender`] prints
//! messages for `--dry-run`.

use crate::error::SendError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Rich-text rendering mode of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
}

/// Per-message delivery options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendOptions {
    pub parse_mode: ParseMode,
    /// Suppress link-preview expansion under the message.
    pub disable_link_preview: bool,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            parse_mode: ParseMode::Html,
            disable_link_preview: true,
        }
    }
}

/// Deliver one message to a destination.
pub trait MessageSender {
    async fn send(&self, destination: &str, body: &str, opts: &SendOptions) -> Result<(), SendError>;
}

/// Sender for the Telegram Bot API `sendMessage` method.
#[derive(Clone)]
pub struct TelegramSender {
    client: Client,
    bot_token: String,
}

impl std::fmt::Debug for TelegramSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramSender")
            .field("api_base", &TELEGRAM_API_BASE)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: ParseMode,
    link_preview_options: LinkPreviewOptions,
}

#[derive(Debug, Serialize)]
struct LinkPreviewOptions {
    is_disabled: bool,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramSender {
    pub fn new(bot_token: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(SEND_TIMEOUT).build()?;
        Ok(Self {
            client,
            bot_token: bot_token.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{TELEGRAM_API_BASE}/bot{}/sendMessage", self.bot_token)
    }
}

impl MessageSender for TelegramSender {
    #[instrument(level = "debug", skip_all, fields(bytes = body.len()))]
    async fn send(&self, destination: &str, body: &str, opts: &SendOptions) -> Result<(), SendError> {
        let request = SendMessageRequest {
            chat_id: destination,
            text: body,
            parse_mode: opts.parse_mode,
            link_preview_options: LinkPreviewOptions {
                is_disabled: opts.disable_link_preview,
            },
        };

        let response = self.client.post(self.endpoint()).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let api: ApiResponse = response.json().await?;
        if !api.ok {
            return Err(SendError::Rejected(
                api.description.unwrap_or_else(|| "no description".to_string()),
            ));
        }
        debug!("Message accepted");
        Ok(())
    }
}

/// Writes each message to stdout, separated by a blank line.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSender;

impl MessageSender for ConsoleSender {
    async fn send(&self, destination: &str, body: &str, _opts: &SendOptions) -> Result<(), SendError> {
        let mut stdout = tokio::io::stdout();
        let text = format!("----- to {destination} -----\n{body}\n");
        stdout.write_all(text.as_bytes()).await?;
        stdout.flush().await?;
        Ok(())
    }
}
