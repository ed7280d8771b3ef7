//! Poll loop: fetch, validate, format, notify.
//!
//! Only the most recent homework (index 0) is reported per cycle. A message
//! identical to the last delivered one is not sent again.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::{
    domain::Cursor,
    homework::{self, NO_NEW_STATUSES},
    notifier::Notifier,
    ports::HomeworkSource,
    retry::Cycle,
    Result,
};

pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

pub struct HomeworkPoller {
    source: Arc<dyn HomeworkSource>,
    notifier: Notifier,
    cursor: Cursor,
    last_sent: Option<String>,
}

impl HomeworkPoller {
    pub fn new(source: Arc<dyn HomeworkSource>, notifier: Notifier, cursor: Cursor) -> Self {
        Self {
            source,
            notifier,
            cursor,
            last_sent: None,
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn last_sent(&self) -> Option<&str> {
        self.last_sent.as_deref()
    }

    /// Run one cycle without sleeping.
    ///
    /// The cursor moves to the server's `current_date` only once the cycle's
    /// message was delivered or suppressed as a duplicate, so an undelivered
    /// status is fetched and sent again next cycle.
    pub async fn poll_once(&mut self) {
        match self.fetch_message().await {
            Ok((message, next_cursor)) => {
                if self.deliver(message).await {
                    self.cursor = next_cursor;
                }
            }
            Err(e) => {
                error!(retryable = e.is_retryable(), "{FAILURE_PREFIX}: {e}");
                self.deliver(format!("{FAILURE_PREFIX}: {e}")).await;
            }
        }
    }

    async fn fetch_message(&self) -> Result<(String, Cursor)> {
        let response = self.source.fetch_statuses(Some(self.cursor)).await?;
        let homeworks = homework::check_response(&response)?;

        let message = match homeworks.first() {
            Some(latest) => homework::parse_status(latest)?,
            None => NO_NEW_STATUSES.to_string(),
        };

        let next_cursor = homework::current_date(&response)
            .map(Cursor)
            .unwrap_or_else(Cursor::now);

        Ok((message, next_cursor))
    }

    /// Returns false only when a send was attempted and failed.
    async fn deliver(&mut self, message: String) -> bool {
        if self.last_sent.as_deref() == Some(message.as_str()) {
            info!("Message unchanged since last cycle, not sending: {message}");
            return true;
        }

        if !self.notifier.send_message(&message).await {
            return false;
        }
        self.last_sent = Some(message);
        true
    }
}

#[async_trait]
impl Cycle for HomeworkPoller {
    async fn run_once(&mut self) {
        self.poll_once().await;
    }
}
