use async_trait::async_trait;
use serde_json::Value;

use crate::{domain::Cursor, Result};

/// Source of homework statuses (the review API).
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    /// Fetch statuses updated since `from_date` (now if `None`).
    ///
    /// Exactly one request per call. Returns the parsed but unvalidated body.
    async fn fetch_statuses(&self, from_date: Option<Cursor>) -> Result<Value>;
}
