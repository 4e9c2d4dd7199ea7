//! Core types and data structures for the expense tracker

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier for a registered user, assigned by the store
pub type UserId = i64;

/// Identifier for an expense row, assigned by the store
pub type ExpenseId = i64;

/// Suggested expense categories for presentation layers.
///
/// A category picker typically constrains input to this set; the core only
/// requires a non-empty category string, so ad-hoc categories written by
/// other clients still list and summarize correctly.
pub const SUGGESTED_CATEGORIES: [&str; 7] = [
    "Food",
    "Rent",
    "Utilities",
    "Transport",
    "Entertainment",
    "Health",
    "Other",
];

/// A registered user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier assigned by the store
    pub id: UserId,
    /// Login name, unique across all users and immutable after registration
    pub username: String,
    /// Salted one-way hash of the password in `salt$digest` form.
    /// The raw secret is never stored, and the hash is never serialized out.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

/// A single recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier assigned by the store
    pub id: ExpenseId,
    /// The user this expense belongs to; set at creation, never changed
    pub owner: UserId,
    /// Calendar date of the expense (no time-of-day, no timezone)
    pub date: NaiveDate,
    /// Spending category
    pub category: String,
    /// Amount in currency units, always strictly positive
    pub amount: BigDecimal,
    /// Free-form note, empty when none was given
    pub description: String,
}

/// Validated field set shared by add and update operations.
///
/// Produced by an [`ExpenseValidator`](crate::traits::ExpenseValidator) from
/// raw caller input; the owner id is passed alongside rather than embedded so
/// that scoping stays explicit at every storage call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub category: String,
    pub amount: BigDecimal,
    pub description: String,
}

/// Per-category total for one user's expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: BigDecimal,
}

/// A category total together with its share of the overall spend.
///
/// Backs chart-style views; the percentages across a full result sum to 100
/// (up to floating point rounding).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: BigDecimal,
    pub percent: f64,
}

/// Errors that can occur in the expense tracker
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// A required field was empty
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The date did not parse as a `YYYY-MM-DD` calendar date
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    /// The amount was not a positive number
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    /// Registration attempted with a username that already exists
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),
    /// No user matched the supplied username and password
    #[error("Invalid username or password")]
    InvalidCredentials,
    /// No expense with this id belongs to the requesting user
    #[error("Expense not found: {0}")]
    NotFound(ExpenseId),
    /// The backing store failed; low-level errors are never leaked raw
    #[error("Storage error: {0}")]
    StoreUnavailable(String),
}

/// Result type for tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn expense_serializes_with_plain_date_and_decimal_amount() {
        let expense = Expense {
            id: 7,
            owner: 1,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            category: "Food".to_string(),
            amount: BigDecimal::from_str("12.5").unwrap(),
            description: "lunch".to_string(),
        };

        let value = serde_json::to_value(&expense).unwrap();
        assert_eq!(value["date"], "2024-01-15");
        assert_eq!(value["amount"], "12.5");

        let back: Expense = serde_json::from_value(value).unwrap();
        assert_eq!(back, expense);
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            password_hash: "salt$digest".to_string(),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password_hash").is_none());

        // Deserializing external data without the field still works
        let back: User = serde_json::from_value(value).unwrap();
        assert_eq!(back.username, "alice");
        assert_eq!(back.password_hash, "");
    }
}
