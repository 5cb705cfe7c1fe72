use std::time::Duration;

use serde_json::Value;

use crate::error::WatchError;
use crate::models::HomeworkRecord;

const RETRY_PERIOD: Duration = Duration::from_secs(600);

/// Where status snapshots come from.
pub trait StatusSource {
    async fn fetch(&self, from_date: i64) -> Result<Value, WatchError>;
}

/// Where notifications go.
pub trait Channel {
    async fn notify(&self, text: &str) -> bool;
}

/// The poll-loop state: checkpoint plus the two dedup memories. All three
/// only change here, and only after a confirmed delivery.
pub struct Watcher<S, C> {
    source: S,
    channel: C,
    checkpoint: i64,
    last_sent: Option<String>,
    last_error: Option<String>,
    interval: Duration,
}

impl<S: StatusSource, C: Channel> Watcher<S, C> {
    pub fn new(source: S, channel: C, start_from: i64) -> Self {
        Self {
            source,
            channel,
            checkpoint: start_from,
            last_sent: None,
            last_error: None,
            interval: RETRY_PERIOD,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub async fn run(&mut self) {
        loop {
            self.tick().await;
            tokio::time::sleep(self.interval).await;
        }
    }

    /// One poll cycle. Never fails: cycle-level errors are relayed to the
    /// chat (deduplicated) and the loop carries on.
    pub async fn tick(&mut self) {
        if let Err(err) = self.poll_once().await {
            self.report_failure(&err).await;
        }
    }

    async fn poll_once(&mut self) -> Result<(), WatchError> {
        let envelope = self.source.fetch(self.checkpoint).await?;
        let homeworks = check_response(&envelope)?;

        if homeworks.is_empty() {
            tracing::debug!("no new homework statuses");
            return Ok(());
        }

        let mut delivered = false;
        for raw in homeworks {
            let record = match HomeworkRecord::from_json(raw) {
                Ok(record) => record,
                Err(err @ WatchError::MissingField(_)) => {
                    tracing::warn!(error = %err, "skipping homework record");
                    continue;
                }
                Err(err) => {
                    tracing::error!(error = %err, "skipping homework record");
                    continue;
                }
            };

            let line = record.status_line();
            if self.last_sent.as_deref() == Some(line.as_str()) {
                tracing::debug!(homework = %record.name, "status unchanged, not resending");
                continue;
            }
            if self.channel.notify(&line).await {
                self.last_sent = Some(line);
                delivered = true;
            }
        }

        // An undelivered cycle keeps the old checkpoint so the same window
        // is fetched again next time.
        if delivered {
            if let Some(current_date) = envelope.get("current_date").and_then(Value::as_i64) {
                self.checkpoint = self.checkpoint.max(current_date);
            }
        }

        Ok(())
    }

    async fn report_failure(&mut self, err: &WatchError) {
        tracing::error!(error = %err, "poll cycle failed");
        let text = format!("Сбой в работе программы: {err}");
        if self.last_error.as_deref() == Some(text.as_str()) {
            return;
        }
        if self.channel.notify(&text).await {
            self.last_error = Some(text);
        }
    }
}

/// Checks the envelope shape and hands back the raw record list. An empty
/// list is valid and means nothing new happened.
fn check_response(envelope: &Value) -> Result<&Vec<Value>, WatchError> {
    if envelope.is_null() {
        return Err(WatchError::EmptyResponse);
    }
    let map = envelope
        .as_object()
        .ok_or(WatchError::Malformed { what: "envelope is not a mapping" })?;
    if map.is_empty() {
        return Err(WatchError::EmptyResponse);
    }
    map.get("homeworks")
        .ok_or(WatchError::MissingField("homeworks"))?
        .as_array()
        .ok_or(WatchError::Malformed { what: "homeworks is not a list" })
}
