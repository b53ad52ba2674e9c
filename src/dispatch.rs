//! Ordered, throttled delivery of a digest.
//!
//! The summary goes first and is the only message whose failure matters to
//! the caller. Detail messages follow in [`CategoryKey::NEWS`] order, each
//! preceded by a fixed delay to stay under the endpoint's rate limit. A
//! failed detail send is logged and the sequence moves on.

use crate::digest::{format_detail, format_summary};
use crate::error::{DispatchError, SendError};
use crate::models::{CategoryKey, CollectionResult, DispatchMessage};
use crate::sender::{MessageSender, SendOptions};
use chrono::NaiveDate;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument};

/// Outcome of a delivered digest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub details_sent: usize,
    pub details_failed: usize,
    /// Categories with nothing to send.
    pub details_skipped: usize,
}

/// Sends a digest through a [`MessageSender`] one message at a time.
#[derive(Debug)]
pub struct DispatchSequencer<S> {
    sender: S,
    destination: String,
    delay: Duration,
    options: SendOptions,
}

impl<S: MessageSender> DispatchSequencer<S> {
    pub fn new(sender: S, destination: impl Into<String>, delay: Duration) -> Self {
        Self {
            sender,
            destination: destination.into(),
            delay,
            options: SendOptions::default(),
        }
    }

    /// Deliver the summary and then every non-empty detail message.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Summary`] if the summary could not be sent; no
    /// detail message is attempted in that case. Detail failures never
    /// produce an error.
    #[instrument(level = "info", skip_all, fields(%date))]
    pub async fn send_digest(
        &self,
        result: &CollectionResult,
        date: NaiveDate,
    ) -> Result<DispatchReport, DispatchError> {
        let summary = DispatchMessage::summary(format_summary(result, date));
        if let Err(e) = self.deliver(&summary).await {
            error!(error = %e, "Summary send failed");
            return Err(DispatchError::Summary(e));
        }
        info!("Summary sent");

        let mut report = DispatchReport::default();
        for category in CategoryKey::NEWS {
            let Some(body) = format_detail(result, category) else {
                report.details_skipped += 1;
                continue;
            };
            let detail = DispatchMessage::detail(body);

            sleep(self.delay).await;
            match self.deliver(&detail).await {
                Ok(()) => {
                    info!(%category, "Detail sent");
                    report.details_sent += 1;
                }
                Err(e) => {
                    error!(%category, error = %e, "Detail send failed; continuing");
                    report.details_failed += 1;
                }
            }
        }

        info!(
            sent = report.details_sent,
            failed = report.details_failed,
            skipped = report.details_skipped,
            "Digest delivered"
        );
        Ok(report)
    }

    async fn deliver(&self, message: &DispatchMessage) -> Result<(), SendError> {
        debug!(summary = message.is_summary, bytes = message.body.len(), "Sending message");
        self.sender
            .send(&self.destination, &message.body, &self.options)
            .await
    }
}

#[cfg(test)]
impl<S> DispatchSequencer<S> {
    pub fn sender(&self) -> &S {
        &self.sender
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IndexBoard, RankedItem};
    use std::sync::Mutex;
    use tokio::time::Instant;

    /// Records every attempt; fails the attempts whose 0-based index is listed.
    #[derive(Default)]
    struct RecordingSender {
        fail_attempts: Vec<usize>,
        attempts: Mutex<Vec<(Instant, String)>>,
    }

    impl RecordingSender {
        fn failing(fail_attempts: &[usize]) -> Self {
            Self {
                fail_attempts: fail_attempts.to_vec(),
                ..Self::default()
            }
        }

        fn bodies(&self) -> Vec<String> {
            self.attempts.lock().unwrap().iter().map(|(_, b)| b.clone()).collect()
        }

        fn times(&self) -> Vec<Instant> {
            self.attempts.lock().unwrap().iter().map(|(t, _)| *t).collect()
        }
    }

    impl MessageSender for RecordingSender {
        async fn send(&self, destination: &str, body: &str, opts: &SendOptions) -> Result<(), SendError> {
            assert_eq!(destination, "-100");
            assert!(opts.disable_link_preview);
            let mut attempts = self.attempts.lock().unwrap();
            let index = attempts.len();
            attempts.push((Instant::now(), body.to_string()));
            if self.fail_attempts.contains(&index) {
                Err(SendError::Rejected(format!("attempt {index}")))
            } else {
                Ok(())
            }
        }
    }

    fn item(rank: usize, title: &str) -> RankedItem {
        RankedItem {
            rank,
            title: title.to_string(),
            link: format!("https://x.test/{rank}"),
        }
    }

    fn full_result() -> CollectionResult {
        CategoryKey::NEWS
            .into_iter()
            .fold(CollectionResult::empty(), |acc, key| {
                acc.with_listing(key, vec![item(1, key.as_str())])
            })
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 6).unwrap()
    }

    const DELAY: Duration = Duration::from_secs(1);

    #[tokio::test(start_paused = true)]
    async fn test_summary_failure_is_fatal_and_stops_details() {
        let sequencer = DispatchSequencer::new(RecordingSender::failing(&[0]), "-100", DELAY);
        let outcome = sequencer.send_digest(&full_result(), date()).await;

        assert!(matches!(outcome, Err(DispatchError::Summary(_))));
        assert_eq!(sequencer.sender().bodies().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_detail_failure_is_isolated() {
        // Attempt 0 is the summary, attempt 2 is the second detail.
        let sequencer = DispatchSequencer::new(RecordingSender::failing(&[2]), "-100", DELAY);
        let report = sequencer.send_digest(&full_result(), date()).await.unwrap();

        assert_eq!(
            report,
            DispatchReport { details_sent: 4, details_failed: 1, details_skipped: 0 }
        );

        let bodies = sequencer.sender().bodies();
        assert_eq!(bodies.len(), 6);
        for (body, category) in bodies[1..].iter().zip(CategoryKey::NEWS) {
            assert!(body.contains(crate::digest::category_label(category)), "{category}");
        }

        let times = sequencer.sender().times();
        for pair in times.windows(2) {
            assert!(pair[1] - pair[0] >= DELAY);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_categories_are_skipped_without_delay() {
        let result = CollectionResult::empty();
        let sequencer = DispatchSequencer::new(RecordingSender::default(), "-100", DELAY);
        let start = Instant::now();
        let report = sequencer.send_digest(&result, date()).await.unwrap();

        assert_eq!(report.details_skipped, 5);
        assert_eq!(sequencer.sender().bodies().len(), 1);
        assert!(Instant::now() - start < DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_scenario() {
        let mut indices = IndexBoard::new();
        indices.insert("KOSPI", "2500.00");
        let result = CollectionResult::empty()
            .with_listing(CategoryKey::Economy, vec![item(1, "A"), item(2, "B")])
            .with_indices(indices);

        let sequencer = DispatchSequencer::new(RecordingSender::default(), "-100", DELAY);
        let report = sequencer.send_digest(&result, date()).await.unwrap();

        assert_eq!(report.details_sent, 1);
        assert_eq!(report.details_skipped, 4);

        let bodies = sequencer.sender().bodies();
        assert_eq!(bodies.len(), 2);
        assert!(bodies[0].contains("KOSPI: 2500.00"));
        assert!(bodies[0].contains("1. A\n2. B\n"));
        assert_eq!(bodies[1].matches("<a href=").count(), 2);
    }
}
