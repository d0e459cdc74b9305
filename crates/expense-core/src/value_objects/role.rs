//! Directory roles and the approval actions each one may perform

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Role of a directory user within a company
///
/// The set is closed: a value outside it coming from the directory is a
/// configuration error, never silently mapped to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Director,
    Cashier,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Director => "director",
            Self::Cashier => "cashier",
        }
    }

    /// Russian label shown to people
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "Пользователь",
            Self::Director => "Директор",
            Self::Cashier => "Кассир",
        }
    }

    /// Approval actions this role is allowed to drive
    pub const fn allowed_actions(self) -> &'static [ApprovalAction] {
        match self {
            Self::User => &[],
            Self::Director => &[ApprovalAction::Approve, ApprovalAction::Decline],
            Self::Cashier => &[ApprovalAction::Issue, ApprovalAction::DirectIssue],
        }
    }

    pub fn can_perform(self, action: ApprovalAction) -> bool {
        self.allowed_actions().contains(&action)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "user" => Ok(Self::User),
            "director" => Ok(Self::Director),
            "cashier" => Ok(Self::Cashier),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

/// Kind of a row in the approval-event ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalAction {
    Approve,
    Decline,
    Issue,
    DirectIssue,
}

impl ApprovalAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Decline => "decline",
            Self::Issue => "issue",
            Self::DirectIssue => "direct_issue",
        }
    }

    /// The only role that may perform this action
    pub const fn required_role(self) -> Role {
        match self {
            Self::Approve | Self::Decline => Role::Director,
            Self::Issue | Self::DirectIssue => Role::Cashier,
        }
    }
}

impl fmt::Display for ApprovalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "approve" => Ok(Self::Approve),
            "decline" => Ok(Self::Decline),
            "issue" => Ok(Self::Issue),
            "direct_issue" => Ok(Self::DirectIssue),
            other => Err(DomainError::InternalError(format!(
                "unknown approval action: {other}"
            ))),
        }
    }
}
