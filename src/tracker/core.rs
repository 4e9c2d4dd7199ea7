//! Main tracker facade coordinating accounts and the expense ledger

use bigdecimal::BigDecimal;

use crate::auth::PasswordHasher;
use crate::tracker::{AccountManager, ExpenseManager};
use crate::traits::*;
use crate::types::*;

/// Expense tracker facade exposing every core operation behind one handle.
///
/// This is the surface a presentation layer consumes: it collects raw input,
/// calls one operation at a time, and renders the result or the returned
/// error. The tracker itself defines no callbacks and runs no background
/// work.
pub struct ExpenseTracker<S: AccountStore + ExpenseStore> {
    accounts: AccountManager<S>,
    expenses: ExpenseManager<S>,
}

impl<S: AccountStore + ExpenseStore + Clone> ExpenseTracker<S> {
    /// Create a new tracker with the given storage backend
    pub fn new(storage: S) -> Self {
        Self {
            accounts: AccountManager::new(storage.clone()),
            expenses: ExpenseManager::new(storage),
        }
    }

    /// Create a new tracker with a custom hasher and validator
    pub fn with_components(
        storage: S,
        hasher: Box<dyn PasswordHasher>,
        validator: Box<dyn ExpenseValidator>,
    ) -> Self {
        Self {
            accounts: AccountManager::with_hasher(storage.clone(), hasher),
            expenses: ExpenseManager::with_validator(storage, validator),
        }
    }

    // Account operations
    /// Register a new user
    pub async fn register(&mut self, username: &str, password: &str) -> TrackerResult<UserId> {
        self.accounts.register(username, password).await
    }

    /// Check credentials and return the matching user's id
    pub async fn authenticate(&self, username: &str, password: &str) -> TrackerResult<UserId> {
        self.accounts.authenticate(username, password).await
    }

    // Ledger operations
    /// Record a new expense for the authenticated user
    pub async fn add_expense(
        &mut self,
        owner: UserId,
        date: &str,
        category: &str,
        amount: BigDecimal,
        description: &str,
    ) -> TrackerResult<ExpenseId> {
        self.expenses
            .add_expense(owner, date, category, amount, description)
            .await
    }

    /// List the user's expenses, newest date first
    pub async fn list_expenses(&self, owner: UserId) -> TrackerResult<Vec<Expense>> {
        self.expenses.list_expenses(owner).await
    }

    /// Fetch a single expense owned by the user
    pub async fn get_expense(&self, owner: UserId, id: ExpenseId) -> TrackerResult<Expense> {
        self.expenses.get_expense(owner, id).await
    }

    /// Overwrite the mutable fields of one of the user's expenses
    pub async fn update_expense(
        &mut self,
        owner: UserId,
        id: ExpenseId,
        date: &str,
        category: &str,
        amount: BigDecimal,
        description: &str,
    ) -> TrackerResult<()> {
        self.expenses
            .update_expense(owner, id, date, category, amount, description)
            .await
    }

    /// Delete one of the user's expenses permanently
    pub async fn delete_expense(&mut self, owner: UserId, id: ExpenseId) -> TrackerResult<()> {
        self.expenses.delete_expense(owner, id).await
    }

    /// Per-category totals for the user's expenses
    pub async fn summarize_by_category(&self, owner: UserId) -> TrackerResult<Vec<CategoryTotal>> {
        self.expenses.summarize_by_category(owner).await
    }

    /// Per-category totals with percentage shares, for chart views
    pub async fn category_shares(&self, owner: UserId) -> TrackerResult<Vec<CategoryShare>> {
        self.expenses.category_shares(owner).await
    }
}
