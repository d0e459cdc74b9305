//! Currencies accepted for expense requests

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Known 3-letter ISO 4217 currency code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Uzs,
    Usd,
    Eur,
    Rub,
}

impl Currency {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Uzs => "UZS",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Rub => "RUB",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UZS" => Ok(Self::Uzs),
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "RUB" => Ok(Self::Rub),
            _ => Err(DomainError::UnknownCurrency(s.to_string())),
        }
    }
}
