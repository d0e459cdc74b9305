//! Inline action keyboards attached to routing notifications
//!
//! Callback data has the shape `expense:<action>:<request id>`; the trigger
//! layer parses it back when a button is pressed.

use expense_core::traits::{ActionButton, ActionKeyboard};
use expense_core::value_objects::ExpenseId;

pub const CONFIRM: &str = "confirm";
pub const CONFIRM_WITH_COMMENT: &str = "confirm_with_comment";
pub const DECLINE: &str = "decline";
pub const ISSUED_FULL: &str = "issued_full";
pub const ISSUED_DIFFERENT: &str = "issued_different";

/// `expense:<action>:<id>`
pub fn callback_data(action: &str, request_id: ExpenseId) -> String {
    format!("expense:{action}:{request_id}")
}

/// Director's choices for a pending request
pub fn approval_keyboard(request_id: ExpenseId) -> ActionKeyboard {
    ActionKeyboard::new()
        .row(vec![
            ActionButton::new("✅ Подтвердить", callback_data(CONFIRM, request_id)),
            ActionButton::new("❌ Отменить", callback_data(DECLINE, request_id)),
        ])
        .row(vec![ActionButton::new(
            "💬 Подтвердить с комментарием",
            callback_data(CONFIRM_WITH_COMMENT, request_id),
        )])
}

/// Cashier's choices for an approved request
pub fn issue_keyboard(request_id: ExpenseId) -> ActionKeyboard {
    ActionKeyboard::new().row(vec![
        ActionButton::new("✅ Выдано", callback_data(ISSUED_FULL, request_id)),
        ActionButton::new(
            "✏️ Выдать другую сумму",
            callback_data(ISSUED_DIFFERENT, request_id),
        ),
    ])
}
