//! # expense-notify
//!
//! Notification dispatch for the expense lifecycle.
//!
//! - [`templates`]: the Russian-language texts sent on each status change
//! - [`keyboards`]: inline action keyboards and their callback data
//! - [`NotificationDispatcher`]: wraps any [`NotificationChannel`] so that a
//!   failed delivery is logged and reported as `false`, never as an error
//! - [`TelegramChannel`]: the Telegram Bot API channel
//!
//! [`NotificationChannel`]: expense_core::traits::NotificationChannel

pub mod dispatcher;
pub mod format;
pub mod keyboards;
pub mod telegram;
pub mod templates;

pub use dispatcher::NotificationDispatcher;
pub use format::format_amount;
pub use telegram::TelegramChannel;
