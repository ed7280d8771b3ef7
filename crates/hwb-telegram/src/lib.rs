//! Telegram adapter (teloxide).
//!
//! This crate implements the `hwb-core` MessagingPort over Telegram Bot API.

use async_trait::async_trait;

use teloxide::{prelude::*, types::Recipient};
use tracing::debug;

use hwb_core::{
    domain::ChatTarget,
    errors::Error,
    messaging::{port::MessagingPort, types::MessagingCapabilities},
    Result,
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    pub fn from_token(token: impl Into<String>) -> Self {
        Self::new(Bot::new(token))
    }

    fn recipient(chat: &ChatTarget) -> Recipient {
        match chat {
            ChatTarget::Id(id) => Recipient::Id(teloxide::types::ChatId(*id)),
            ChatTarget::Username(name) => Recipient::ChannelUsername(name.clone()),
        }
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::Messaging(format!("telegram error: {e}"))
    }
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    fn capabilities(&self) -> MessagingCapabilities {
        MessagingCapabilities {
            max_message_len: 4096,
        }
    }

    async fn send_text(&self, chat: &ChatTarget, text: &str) -> Result<()> {
        // Plain text: homework names are not HTML-escaped.
        let msg = self
            .bot
            .send_message(Self::recipient(chat), text.to_string())
            .await
            .map_err(Self::map_err)?;
        debug!("Telegram accepted message {}", msg.id.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_chat_targets_to_recipients() {
        assert_eq!(
            TelegramMessenger::recipient(&ChatTarget::Id(-100123)),
            Recipient::Id(teloxide::types::ChatId(-100123))
        );
        assert_eq!(
            TelegramMessenger::recipient(&ChatTarget::Username("@reviews".into())),
            Recipient::ChannelUsername("@reviews".to_string())
        );
    }

    #[tokio::test]
    async fn transport_failure_maps_to_messaging_error() {
        // Point the bot at a closed local port so the request fails fast.
        let bot = Bot::new("123:fake")
            .set_api_url(reqwest::Url::parse("http://127.0.0.1:9/").unwrap());
        let messenger = TelegramMessenger::new(bot);

        let err = messenger
            .send_text(&ChatTarget::Id(1), "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Messaging(_)), "{err:?}");
        assert!(err.to_string().contains("telegram error"));
    }
}
