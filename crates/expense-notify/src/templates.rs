//! Message texts sent on each status change
//!
//! Every function is pure: it only reads the request and the participants
//! and returns the text to deliver.

use expense_core::entities::{ExpenseRequest, User};
use expense_core::value_objects::ExpenseStatus;

use crate::format::format_amount;

fn amount_line(request: &ExpenseRequest) -> String {
    format!(
        "Сумма: {} {}",
        format_amount(request.amount),
        request.currency
    )
}

fn description_or_dash(request: &ExpenseRequest) -> &str {
    let description = request.description.trim();
    if description.is_empty() {
        "-"
    } else {
        description
    }
}

/// Comment suffix; empty for a missing comment or the "-" placeholder
fn comment_suffix(label: &str, comment: Option<&str>) -> String {
    match comment.map(str::trim) {
        Some(c) if !c.is_empty() && c != "-" => format!("\n{label}: {c}"),
        _ => String::new(),
    }
}

/// To the director: a new request awaits a decision
pub fn new_request_for_director(request: &ExpenseRequest, requester: &User) -> String {
    format!(
        "Новая заявка #{}\nПользователь: {} (ID: {})\n{}\nКомментарий: {}",
        request.id,
        requester.display_name(),
        requester.id,
        amount_line(request),
        description_or_dash(request),
    )
}

/// To the requester: the request changed status
///
/// Returns `None` for statuses the requester is not told about.
pub fn status_for_requester(request: &ExpenseRequest) -> Option<String> {
    let comment = comment_suffix("Комментарий", request.director_comment.as_deref());

    let text = match request.status {
        ExpenseStatus::Pending => return None,
        ExpenseStatus::Approved => format!(
            "Ваша заявка #{} ✅ подтверждена директором.\nОжидайте выдачи от кассира.{comment}",
            request.id
        ),
        ExpenseStatus::Declined => format!(
            "Ваша заявка #{} 🚫 отклонена директором.\n{}\nОписание: {}{comment}",
            request.id,
            amount_line(request),
            description_or_dash(request),
        ),
        ExpenseStatus::Issued => {
            let mut text = format!(
                "Ваша заявка #{} 💰 выдана кассиром.\nВы можете получить средства.",
                request.id
            );
            if let Some(issued) = request.issued_amount.filter(|_| request.has_issued_delta()) {
                text.push_str(&format!(
                    "\nВыдана сумма: {} {cur} (запрошено: {} {cur})",
                    format_amount(issued),
                    format_amount(request.amount),
                    cur = request.currency,
                ));
            }
            text
        }
    };

    Some(text)
}

/// To the cashier: an approved request is ready to be paid out
pub fn approved_for_cashier(request: &ExpenseRequest, requester: &User) -> String {
    format!(
        "Заявка #{} подтверждена директором.\n{}\nОжидает выдачи указанной суммы {} (ID: {}){}",
        request.id,
        amount_line(request),
        requester.display_name(),
        requester.id,
        comment_suffix("Комментарий директора", request.director_comment.as_deref()),
    )
}

/// To the director: a cashier paid out money without approval
pub fn direct_issue_for_director(
    request: &ExpenseRequest,
    cashier: &User,
    recipient: &User,
    comment: Option<&str>,
) -> String {
    format!(
        "ℹ️ Кассир {} выдал средства без подтверждения.\nЗаявка #{}\nПолучатель: {}\n{}\nНазначение: {}{}",
        cashier.display_name(),
        request.id,
        recipient.display_name(),
        amount_line(request),
        description_or_dash(request),
        comment_suffix("Комментарий", comment),
    )
}

/// To the recipient of a direct issue
pub fn direct_issue_for_recipient(request: &ExpenseRequest, cashier: &User) -> String {
    format!(
        "💰 Вам выданы средства.\nЗаявка #{}\n{}\nНазначение: {}\nКассир: {}",
        request.id,
        amount_line(request),
        description_or_dash(request),
        cashier.display_name(),
    )
}
