//! Input validation
//!
//! Pure, total functions that normalize user-typed text before it reaches the
//! lifecycle engine. Each returns the normalized value on success; the error's
//! `Display` is the message shown back to the user.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Largest amount accepted, in whole currency units (inclusive)
pub const MAX_AMOUNT_UNITS: i64 = 10_000_000_000;

/// Fractional digits kept on every amount
pub const AMOUNT_SCALE: u32 = 2;

pub const COMMENT_MIN_CHARS: usize = 3;
pub const COMMENT_MAX_CHARS: usize = 1000;

/// Validation failures with their user-facing messages
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Сумма не может быть пустой.")]
    EmptyAmount,

    #[error("Неверный формат суммы. Введите положительное число, например: 100000")]
    InvalidAmountFormat,

    #[error("Сумма должна быть больше нуля.")]
    NonPositiveAmount,

    #[error("Сумма слишком большая. Введите число менее 10 млрд.")]
    AmountTooLarge,

    #[error("Комментарий не может быть пустым.")]
    EmptyComment,

    #[error("Комментарий должен содержать минимум {min} символа.")]
    CommentTooShort { min: usize },

    #[error("Комментарий слишком длинный (максимум {max} символов).")]
    CommentTooLong { max: usize },

    #[error("Поле не может быть пустым.")]
    EmptyField,
}

/// Largest accepted amount as a decimal
pub fn max_amount() -> Decimal {
    Decimal::from(MAX_AMOUNT_UNITS)
}

/// Parse a user-typed amount
///
/// Accepts `,` as the decimal separator and spaces as thousands separators,
/// so `"1 234,56"` yields `1234.56`.
pub fn validate_amount(input: &str) -> Result<Decimal, ValidationError> {
    let normalized: String = input
        .trim()
        .chars()
        .filter(|c| !is_group_separator(*c))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if normalized.is_empty() {
        return Err(ValidationError::EmptyAmount);
    }

    let value = Decimal::from_str(&normalized).map_err(|_| unparsable_amount(&normalized))?;
    validate_amount_value(value)
}

/// Tell an overflowing number apart from text that is not a number at all
fn unparsable_amount(normalized: &str) -> ValidationError {
    let (negative, unsigned) = match normalized.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, normalized.strip_prefix('+').unwrap_or(normalized)),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let well_formed = !integer.is_empty()
        && integer.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit());
    if !well_formed {
        return ValidationError::InvalidAmountFormat;
    }

    let significant = integer.trim_start_matches('0').len();
    if significant <= MAX_AMOUNT_UNITS.to_string().len() {
        ValidationError::InvalidAmountFormat
    } else if negative {
        ValidationError::NonPositiveAmount
    } else {
        ValidationError::AmountTooLarge
    }
}

/// Check an already parsed amount against the accepted range
///
/// The result is rounded to [`AMOUNT_SCALE`] digits.
pub fn validate_amount_value(value: Decimal) -> Result<Decimal, ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    if value > max_amount() {
        return Err(ValidationError::AmountTooLarge);
    }

    let rounded = value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(rounded)
}

/// Validate a free-text comment; returns it trimmed
pub fn validate_comment(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyComment);
    }

    let chars = trimmed.chars().count();
    if chars < COMMENT_MIN_CHARS {
        return Err(ValidationError::CommentTooShort {
            min: COMMENT_MIN_CHARS,
        });
    }
    if chars > COMMENT_MAX_CHARS {
        return Err(ValidationError::CommentTooLong {
            max: COMMENT_MAX_CHARS,
        });
    }
    Ok(trimmed.to_string())
}

/// Validate a comment that the caller may omit
///
/// `None` and blank input both mean "no comment".
pub fn validate_optional_comment(input: Option<&str>) -> Result<Option<String>, ValidationError> {
    match input {
        Some(text) if !text.trim().is_empty() => validate_comment(text).map(Some),
        _ => Ok(None),
    }
}

/// Reject blank input; returns it trimmed
pub fn validate_not_empty(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField);
    }
    Ok(trimmed.to_string())
}

fn is_group_separator(c: char) -> bool {
    // regular, no-break and narrow no-break spaces
    matches!(c, ' ' | '\u{a0}' | '\u{202f}')
}
