//! Telegram Bot API notification channel

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId as TgChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId};
use teloxide::{ApiError, RequestError};
use tracing::{debug, instrument};

use expense_core::traits::{ActionKeyboard, MessageRef, NotificationChannel, NotifyError};
use expense_core::value_objects::ChatId;

/// Delivers notifications as Telegram messages with inline keyboards
#[derive(Clone)]
pub struct TelegramChannel {
    bot: Bot,
}

impl TelegramChannel {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            bot: Bot::new(token),
        }
    }

    /// Point the bot at a self-hosted Bot API server
    pub fn with_api_url(self, api_url: &str) -> Result<Self, NotifyError> {
        let url = reqwest::Url::parse(api_url)
            .map_err(|e| NotifyError::Delivery(format!("invalid Bot API url {api_url}: {e}")))?;
        Ok(Self {
            bot: self.bot.set_api_url(url),
        })
    }

    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}

fn to_markup(keyboard: &ActionKeyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|button| {
                InlineKeyboardButton::callback(button.text.clone(), button.callback_data.clone())
            })
            .collect::<Vec<_>>()
    }))
}

#[async_trait]
impl NotificationChannel for TelegramChannel {
    #[instrument(skip(self, text, keyboard))]
    async fn send(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<&ActionKeyboard>,
    ) -> Result<MessageRef, NotifyError> {
        let request = self
            .bot
            .send_message(TgChatId(chat_id.into_inner()), text.to_string());

        let result = match keyboard {
            Some(keyboard) => request.reply_markup(to_markup(keyboard)).await,
            None => request.await,
        };

        let message = result.map_err(|e| NotifyError::Delivery(e.to_string()))?;
        debug!(message_id = message.id.0, "Telegram message sent");

        Ok(MessageRef {
            chat_id,
            message_id: message.id.0,
        })
    }

    #[instrument(skip(self, text))]
    async fn edit(&self, message: MessageRef, text: &str) -> Result<(), NotifyError> {
        let result = self
            .bot
            .edit_message_text(
                TgChatId(message.chat_id.into_inner()),
                MessageId(message.message_id),
                text.to_string(),
            )
            .await;

        match result {
            Ok(_) | Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(()),
            Err(RequestError::Api(ApiError::MessageToEditNotFound)) => {
                Err(NotifyError::MessageNotFound(message))
            }
            Err(e) => Err(NotifyError::Delivery(e.to_string())),
        }
    }
}

impl std::fmt::Debug for TelegramChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramChannel").finish_non_exhaustive()
    }
}
