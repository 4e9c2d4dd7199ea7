//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::types::*;
use crate::utils::validation;

/// Storage abstraction for user accounts.
///
/// Implementations back registration and login; the managers never see how
/// rows are stored. `MemoryStorage` covers tests and `SqliteStorage` the
/// real single-file deployment, and any other relational backend can slot in
/// by implementing these methods.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new user with an already-hashed credential.
    ///
    /// Fails with [`TrackerError::DuplicateUsername`] when the username is
    /// taken; returns the store-assigned id otherwise.
    async fn insert_user(&mut self, username: &str, password_hash: &str) -> TrackerResult<UserId>;

    /// Look up a user by exact username
    async fn find_user(&self, username: &str) -> TrackerResult<Option<User>>;
}

/// Storage abstraction for the expense ledger.
///
/// Every method is scoped by the owning user's id; an implementation must
/// never read or touch a row belonging to a different user, even when the
/// row id matches.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Persist a new expense for `owner` and return its fresh id
    async fn insert_expense(&mut self, owner: UserId, fields: &NewExpense)
        -> TrackerResult<ExpenseId>;

    /// All of `owner`'s expenses, ordered by date descending with ties broken
    /// by ascending id (insertion order)
    async fn list_expenses(&self, owner: UserId) -> TrackerResult<Vec<Expense>>;

    /// Fetch a single expense owned by `owner`, `None` when no such row
    async fn get_expense(&self, owner: UserId, id: ExpenseId) -> TrackerResult<Option<Expense>>;

    /// Overwrite the mutable fields of one of `owner`'s expenses.
    ///
    /// Returns `false` when zero rows matched, which covers both an unknown
    /// id and an id owned by someone else.
    async fn update_expense(
        &mut self,
        owner: UserId,
        id: ExpenseId,
        fields: &NewExpense,
    ) -> TrackerResult<bool>;

    /// Remove one of `owner`'s expenses permanently.
    ///
    /// Returns `false` when zero rows matched.
    async fn delete_expense(&mut self, owner: UserId, id: ExpenseId) -> TrackerResult<bool>;

    /// Per-category amount sums for `owner`, ordered by category ascending
    async fn totals_by_category(&self, owner: UserId) -> TrackerResult<Vec<CategoryTotal>>;
}

/// Trait for validating raw expense input before it reaches storage
pub trait ExpenseValidator: Send + Sync {
    /// Validate raw field values and produce the parsed field set.
    ///
    /// Must reject before any store access: an unparsable date, an empty
    /// category, and a non-positive amount.
    fn validate(
        &self,
        date: &str,
        category: &str,
        amount: &BigDecimal,
        description: &str,
    ) -> TrackerResult<NewExpense>;
}

/// Default expense validator enforcing the core field rules
pub struct DefaultExpenseValidator;

impl ExpenseValidator for DefaultExpenseValidator {
    fn validate(
        &self,
        date: &str,
        category: &str,
        amount: &BigDecimal,
        description: &str,
    ) -> TrackerResult<NewExpense> {
        let date = validation::validate_date(date)?;
        validation::validate_category(category)?;
        validation::validate_positive_amount(amount)?;

        Ok(NewExpense {
            date,
            category: category.trim().to_string(),
            amount: amount.clone(),
            description: description.trim().to_string(),
        })
    }
}
