//! Error types for each stage of a digest run.
//!
//! Only [`ConfigError`] and [`DispatchError`] ever reach `main`. Fetch,
//! extraction and detail-send failures are logged and contained where they
//! happen.

use thiserror::Error;

/// Failure to retrieve the raw content of one source page.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {target} failed: {source}")]
    Request {
        target: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {target} timed out")]
    Timeout { target: String },

    #[error("{target} answered with status {status}")]
    Status { target: String, status: u16 },
}

impl FetchError {
    /// Classify a reqwest error, separating timeouts from other transport errors.
    pub fn from_reqwest(target: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            FetchError::Timeout {
                target: target.to_string(),
            }
        } else {
            FetchError::Request {
                target: target.to_string(),
                source,
            }
        }
    }
}

/// Malformed or unexpected page structure.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid selector '{selector}': {reason}")]
    Selector {
        selector: &'static str,
        reason: String,
    },
}

/// Anything that leaves one category empty for this run.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Failure to deliver one message to the chat endpoint.
#[derive(Error, Debug)]
pub enum SendError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("chat endpoint answered with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("chat endpoint rejected the message: {0}")]
    Rejected(String),

    #[error("failed to write message: {0}")]
    Io(#[from] std::io::Error),
}

/// Startup configuration problems.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required setting: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Fatal outcome of a dispatch run.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("summary message was not delivered: {0}")]
    Summary(#[source] SendError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_names_field() {
        let e = ConfigError::MissingField { field: "BOT_TOKEN" };
        assert_eq!(e.to_string(), "missing required setting: BOT_TOKEN");
    }

    #[test]
    fn test_dispatch_error_wraps_send_error() {
        let e = DispatchError::Summary(SendError::Rejected("chat not found".into()));
        assert_eq!(
            e.to_string(),
            "summary message was not delivered: chat endpoint rejected the message: chat not found"
        );
    }

    #[test]
    fn test_fetch_status_display() {
        let e = FetchError::Status {
            target: "https://finance.naver.com/sise/".into(),
            status: 503,
        };
        assert!(e.to_string().contains("503"));
    }
}
