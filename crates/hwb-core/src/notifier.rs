use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::{
    domain::ChatTarget,
    messaging::{port::MessagingPort, types::truncate_chars},
};

/// Sends notifications to the configured chat.
///
/// Delivery failures are logged and swallowed: a broken messaging channel
/// must never stop polling.
#[derive(Clone)]
pub struct Notifier {
    messenger: Arc<dyn MessagingPort>,
    chat: ChatTarget,
}

impl Notifier {
    pub fn new(messenger: Arc<dyn MessagingPort>, chat: ChatTarget) -> Self {
        Self { messenger, chat }
    }

    /// Attempt one delivery. Returns whether it succeeded.
    pub async fn send_message(&self, message: &str) -> bool {
        let max = self.messenger.capabilities().max_message_len;
        let text = truncate_chars(message, max);
        if text.len() < message.len() {
            warn!("Message truncated to {max} characters");
        }

        debug!("Sending message to chat {}", self.chat);
        match self.messenger.send_text(&self.chat, text).await {
            Ok(()) => {
                debug!("Bot sent message: {text}");
                true
            }
            Err(e) => {
                error!("Failed to send message: {e}");
                false
            }
        }
    }
}
