//! Validation utilities

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::str::FromStr;

use crate::types::*;

/// Validate that a username is non-empty after trimming
pub fn validate_username(username: &str) -> TrackerResult<()> {
    if username.trim().is_empty() {
        return Err(TrackerError::InvalidInput(
            "Username cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validate that a password is non-empty after trimming
pub fn validate_password(password: &str) -> TrackerResult<()> {
    if password.trim().is_empty() {
        return Err(TrackerError::InvalidInput(
            "Password cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Parse a `YYYY-MM-DD` date string into a calendar date
pub fn validate_date(date: &str) -> TrackerResult<NaiveDate> {
    let trimmed = date.trim();

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        TrackerError::InvalidDate(format!("'{}' is not a valid YYYY-MM-DD date", trimmed))
    })
}

/// Validate that a category is non-empty after trimming
pub fn validate_category(category: &str) -> TrackerResult<()> {
    if category.trim().is_empty() {
        return Err(TrackerError::InvalidInput(
            "Category cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validate that an amount is strictly positive
pub fn validate_positive_amount(amount: &BigDecimal) -> TrackerResult<()> {
    if *amount <= BigDecimal::from(0) {
        return Err(TrackerError::InvalidAmount(
            "Amount must be a positive number".to_string(),
        ));
    }

    Ok(())
}

/// Parse a raw amount string into a strictly positive decimal.
///
/// Convenience for presentation adapters that collect the amount as text;
/// the manager APIs themselves take an already-parsed [`BigDecimal`].
pub fn parse_amount(text: &str) -> TrackerResult<BigDecimal> {
    let trimmed = text.trim();

    let amount = BigDecimal::from_str(trimmed).map_err(|_| {
        TrackerError::InvalidAmount(format!("'{}' is not a valid number", trimmed))
    })?;

    validate_positive_amount(&amount)?;

    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_date_parses() {
        let date = validate_date("2024-01-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn slash_separated_date_rejected() {
        assert!(matches!(
            validate_date("2024/01/15"),
            Err(TrackerError::InvalidDate(_))
        ));
    }

    #[test]
    fn prose_date_rejected() {
        assert!(matches!(
            validate_date("Jan 1 2024"),
            Err(TrackerError::InvalidDate(_))
        ));
    }

    #[test]
    fn impossible_calendar_date_rejected() {
        assert!(matches!(
            validate_date("2024-02-30"),
            Err(TrackerError::InvalidDate(_))
        ));
    }

    #[test]
    fn empty_date_rejected() {
        assert!(matches!(
            validate_date("   "),
            Err(TrackerError::InvalidDate(_))
        ));
    }

    #[test]
    fn parse_amount_accepts_decimals() {
        assert_eq!(parse_amount(" 12.50 ").unwrap(), BigDecimal::from_str("12.50").unwrap());
    }

    #[test]
    fn parse_amount_rejects_non_numeric() {
        assert!(matches!(
            parse_amount("abc"),
            Err(TrackerError::InvalidAmount(_))
        ));
    }

    #[test]
    fn parse_amount_rejects_negative() {
        assert!(matches!(
            parse_amount("-5"),
            Err(TrackerError::InvalidAmount(_))
        ));
    }

    #[test]
    fn parse_amount_rejects_zero() {
        assert!(matches!(
            parse_amount("0"),
            Err(TrackerError::InvalidAmount(_))
        ));
    }
}
