//! Expense request status and its transition table

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Lifecycle status of an expense request
///
/// ```text
/// pending ──approve──> approved ──issue──> issued
///    │
///    └──decline──> declined
/// ```
///
/// Direct issuance creates a row that is already `issued`; it is a creation
/// path, not a transition, so it does not appear in [`ExpenseStatus::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    Pending,
    Approved,
    Declined,
    Issued,
}

impl ExpenseStatus {
    /// Database / wire representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Declined => "declined",
            Self::Issued => "issued",
        }
    }

    /// Human-readable label used in chat messages
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Ожидает подтверждения",
            Self::Approved => "Подтверждено директором",
            Self::Declined => "Отклонено",
            Self::Issued => "Выдано",
        }
    }

    /// Whether `next` is reachable from `self` in a single transition
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved | Self::Declined) | (Self::Approved, Self::Issued)
        )
    }

    /// Declined and issued requests accept no further transitions.
    ///
    /// Approved is not terminal for the cashier: it still awaits issuance.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Declined | Self::Issued)
    }

    /// Statuses shown in the cashier/requester history view
    pub const fn history_statuses() -> [Self; 2] {
        [Self::Approved, Self::Issued]
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "declined" => Ok(Self::Declined),
            "issued" => Ok(Self::Issued),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}
