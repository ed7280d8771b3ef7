use async_trait::async_trait;

use crate::{domain::ChatTarget, messaging::types::MessagingCapabilities, Result};

/// Outbound messaging port.
///
/// One call is one delivery attempt; implementations must not retry.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    fn capabilities(&self) -> MessagingCapabilities;

    async fn send_text(&self, chat: &ChatTarget, text: &str) -> Result<()>;
}
