//! Fire-and-forget notification dispatch
//!
//! A failed delivery is logged with the request and recipient ids and
//! reported as `None`/`false`; it never reaches the caller as an error.

use std::sync::Arc;

use tracing::{debug, error, instrument, warn};

use expense_core::entities::{ExpenseRequest, User};
use expense_core::traits::{ActionKeyboard, MessageRef, NotificationChannel, NotifyError};
use expense_core::value_objects::ExpenseId;

use crate::keyboards::{approval_keyboard, issue_keyboard};
use crate::templates;

/// Sends lifecycle notifications through a [`NotificationChannel`]
#[derive(Clone)]
pub struct NotificationDispatcher {
    channel: Arc<dyn NotificationChannel>,
    enabled: bool,
}

impl NotificationDispatcher {
    pub fn new(channel: Arc<dyn NotificationChannel>) -> Self {
        Self {
            channel,
            enabled: true,
        }
    }

    /// When disabled every send is logged and skipped
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Deliver `text` to `recipient`
    ///
    /// Returns the delivered message, or `None` when the recipient has no
    /// address, dispatch is disabled, or the channel failed.
    #[instrument(skip(self, recipient, text, keyboard), fields(recipient_id = %recipient.id))]
    pub async fn notify(
        &self,
        recipient: &User,
        request_id: ExpenseId,
        text: &str,
        keyboard: Option<&ActionKeyboard>,
    ) -> Option<MessageRef> {
        let Some(chat_id) = recipient.chat_id else {
            warn!(
                request_id = %request_id,
                recipient_id = %recipient.id,
                "Recipient has no chat id, notification skipped"
            );
            return None;
        };

        if !self.enabled {
            debug!(request_id = %request_id, recipient_id = %recipient.id, "Notifications disabled");
            return None;
        }

        match self.channel.send(chat_id, text, keyboard).await {
            Ok(message) => {
                debug!(
                    request_id = %request_id,
                    recipient_id = %recipient.id,
                    message_id = message.message_id,
                    "Notification sent"
                );
                Some(message)
            }
            Err(e) => {
                error!(
                    request_id = %request_id,
                    recipient_id = %recipient.id,
                    chat_id = %chat_id,
                    error = %e,
                    "Failed to send notification"
                );
                None
            }
        }
    }

    /// Replace the text of an already delivered message
    #[instrument(skip(self, text))]
    pub async fn update(&self, message: MessageRef, text: &str) -> bool {
        if !self.enabled {
            return false;
        }

        match self.channel.edit(message, text).await {
            Ok(()) => true,
            Err(NotifyError::MessageNotFound(_)) => {
                warn!(chat_id = %message.chat_id, message_id = message.message_id, "Message to edit is gone");
                false
            }
            Err(e) => {
                error!(
                    chat_id = %message.chat_id,
                    message_id = message.message_id,
                    error = %e,
                    "Failed to update notification"
                );
                false
            }
        }
    }

    /// New pending request, with the approval keyboard
    pub async fn notify_new_request(
        &self,
        request: &ExpenseRequest,
        requester: &User,
        director: &User,
    ) -> bool {
        let text = templates::new_request_for_director(request, requester);
        let keyboard = approval_keyboard(request.id);
        self.notify(director, request.id, &text, Some(&keyboard))
            .await
            .is_some()
    }

    /// Status change, to the requester
    pub async fn notify_requester(&self, request: &ExpenseRequest, requester: &User) -> bool {
        let Some(text) = templates::status_for_requester(request) else {
            return false;
        };
        self.notify(requester, request.id, &text, None).await.is_some()
    }

    /// Approved request, to the cashier, with the issue keyboard
    pub async fn notify_cashier(
        &self,
        request: &ExpenseRequest,
        requester: &User,
        cashier: &User,
    ) -> bool {
        let text = templates::approved_for_cashier(request, requester);
        let keyboard = issue_keyboard(request.id);
        self.notify(cashier, request.id, &text, Some(&keyboard))
            .await
            .is_some()
    }

    /// Informational message to the director after a direct issue
    pub async fn notify_direct_issue_director(
        &self,
        request: &ExpenseRequest,
        cashier: &User,
        recipient: &User,
        director: &User,
        comment: Option<&str>,
    ) -> bool {
        let text = templates::direct_issue_for_director(request, cashier, recipient, comment);
        self.notify(director, request.id, &text, None).await.is_some()
    }

    /// Direct issue, to the person who received the money
    pub async fn notify_direct_issue_recipient(
        &self,
        request: &ExpenseRequest,
        cashier: &User,
        recipient: &User,
    ) -> bool {
        let text = templates::direct_issue_for_recipient(request, cashier);
        self.notify(recipient, request.id, &text, None).await.is_some()
    }
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}
