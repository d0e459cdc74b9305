//! Notification channel port

use async_trait::async_trait;
use thiserror::Error;

use crate::value_objects::ChatId;

/// A button that sends `callback_data` back to the trigger layer when pressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub text: String,
    pub callback_data: String,
}

impl ActionButton {
    pub fn new(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: callback_data.into(),
        }
    }
}

/// Rows of inline buttons attached to a message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionKeyboard {
    pub rows: Vec<Vec<ActionButton>>,
}

impl ActionKeyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(mut self, buttons: Vec<ActionButton>) -> Self {
        self.rows.push(buttons);
        self
    }

    /// Iterate every button, row by row
    pub fn buttons(&self) -> impl Iterator<Item = &ActionButton> {
        self.rows.iter().flatten()
    }
}

/// Handle to a message already delivered, for later edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: i32,
}

/// Notification delivery errors
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Message not found: {0:?}")]
    MessageNotFound(MessageRef),
}

/// Anything that can deliver a text message to an address
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Deliver `text`, optionally with an action keyboard
    async fn send(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<&ActionKeyboard>,
    ) -> Result<MessageRef, NotifyError>;

    /// Replace the text of a delivered message and drop its keyboard
    async fn edit(&self, message: MessageRef, text: &str) -> Result<(), NotifyError>;
}
