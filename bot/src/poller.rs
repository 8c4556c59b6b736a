//! The poll loop: fetch, validate, format, notify, sleep.
//!
//! # Design
//! `Poller` owns the only mutable state in the process, the `PollCursor` and
//! the last delivered status message. A cycle runs to completion on the
//! calling thread; the network calls block it, which is fine for a single
//! unit of work. Only the sleep between cycles is asynchronous so that a
//! shutdown request ends the wait immediately.
//!
//! Every `BotError` raised inside a cycle is contained there: it is logged,
//! reported to the chat on a best-effort basis, and the loop carries on after
//! the interval. The cursor only moves when a cycle succeeds.

use std::time::Duration;

use homework_core::{
    current_date, extract_latest, failure_message, format_status, BotError, PracticumClient,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::notifier::Notifier;
use crate::transport::Transport;

/// Lower bound (seconds since epoch) for the next status fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollCursor(i64);

impl PollCursor {
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp())
    }

    pub fn at(timestamp: i64) -> Self {
        Self(timestamp)
    }

    pub fn value(self) -> i64 {
        self.0
    }

    /// Move to the server-reported timestamp; keep the current one if the
    /// server did not report any.
    pub fn advance(&mut self, reported: Option<i64>) {
        if let Some(timestamp) = reported {
            self.0 = timestamp;
        }
    }
}

/// What a single cycle ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A status change was delivered.
    Notified(String),
    /// The API reported no submissions since the cursor.
    NoUpdates,
    /// The latest submission has the status that was already delivered.
    Unchanged,
    /// The cycle failed; `reported` tells whether the chat was told.
    Failed { error: BotError, reported: bool },
}

pub struct Poller<T, N> {
    client: PracticumClient,
    transport: T,
    notifier: N,
    cursor: PollCursor,
    interval: Duration,
    last_message: Option<String>,
}

impl<T: Transport, N: Notifier> Poller<T, N> {
    pub fn new(
        client: PracticumClient,
        transport: T,
        notifier: N,
        cursor: PollCursor,
        interval: Duration,
    ) -> Self {
        Self {
            client,
            transport,
            notifier,
            cursor,
            interval,
            last_message: None,
        }
    }

    pub fn cursor(&self) -> PollCursor {
        self.cursor
    }

    /// Run one cycle. Never fails: errors are turned into `CycleOutcome::Failed`.
    pub fn poll_once(&mut self) -> CycleOutcome {
        match self.cycle() {
            Ok(outcome) => outcome,
            Err(error) => self.report_failure(error),
        }
    }

    /// Poll until `shutdown` is cancelled, sleeping `interval` between cycles
    /// regardless of how each cycle ended.
    pub async fn run(mut self, shutdown: CancellationToken) {
        info!(
            interval_secs = self.interval.as_secs(),
            from_date = self.cursor.value(),
            "polling started"
        );
        while !shutdown.is_cancelled() {
            self.poll_once();
            tokio::select! {
                _ = shutdown.cancelled() => {}
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
        info!(from_date = self.cursor.value(), "polling stopped");
    }

    fn cycle(&mut self) -> Result<CycleOutcome, BotError> {
        let from_date = self.cursor.value();
        let request = self.client.build_homework_statuses(from_date);
        let response = self.transport.execute(&request)?;
        let envelope = self.client.parse_homework_statuses(response)?;
        info!(from_date, "homework statuses fetched");

        let reported = current_date(&envelope);
        let latest = match extract_latest(&envelope) {
            Ok(record) => record,
            Err(BotError::EmptyResult) => {
                info!("no homework status updates");
                self.cursor.advance(reported);
                return Ok(CycleOutcome::NoUpdates);
            }
            Err(e) => return Err(e),
        };

        let message = format_status(&latest)?;
        if self.last_message.as_deref() == Some(message.as_str()) {
            debug!(homework = ?latest.homework_name, "status unchanged since last notification");
            self.cursor.advance(reported);
            return Ok(CycleOutcome::Unchanged);
        }

        info!(
            homework = ?latest.homework_name,
            status = ?latest.status,
            "homework status changed"
        );
        self.notifier.notify(&message)?;
        self.cursor.advance(reported);
        self.last_message = Some(message.clone());
        Ok(CycleOutcome::Notified(message))
    }

    fn report_failure(&mut self, error: BotError) -> CycleOutcome {
        error!(kind = error.kind(), "poll cycle failed: {error}");
        let reported = match self.notifier.notify(&failure_message(&error)) {
            Ok(()) => true,
            Err(delivery) => {
                error!(
                    kind = delivery.kind(),
                    recipient = %self.notifier.recipient(),
                    "could not report failure: {delivery}"
                );
                false
            }
        };
        CycleOutcome::Failed { error, reported }
    }
}
