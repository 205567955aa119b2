//! Field validation shared by every manager.
//!
//! All helpers are pure: they either return the normalized value or the
//! error describing why the input was rejected. Managers call these before
//! touching the database so a malformed request never opens a write.

use chrono::NaiveDate;
use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, MoneyCents, ResultEngine, TransactionKind};

/// Parses a transaction kind, case-insensitively, into its canonical form.
pub fn parse_kind(value: &str) -> ResultEngine<TransactionKind> {
    TransactionKind::try_from(value.trim().to_ascii_lowercase().as_str())
}

/// Parses a user-supplied amount string and requires it to be positive.
///
/// A parseable `0` (or a negative value) is treated as present but invalid,
/// with its own message; it must never be confused with a missing field.
pub fn parse_amount(value: &str) -> ResultEngine<MoneyCents> {
    let amount: MoneyCents = value.parse()?;
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount(
            "amount must be positive".to_string(),
        ));
    }
    Ok(amount)
}

/// Parses a `YYYY-MM-DD` date, rejecting malformed or impossible dates.
///
/// Future dates are allowed.
pub fn parse_date(value: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| EngineError::InvalidField(format!("invalid date: {}", value.trim())))
}

/// Trims and NFC-normalizes a required name, rejecting empty input.
pub fn require_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidField(format!(
            "{label} name must not be empty"
        )));
    }
    Ok(trimmed.nfc().collect())
}

/// Normalizes optional free text: trimmed, empty becomes `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}
