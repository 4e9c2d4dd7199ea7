//! Owner-scoped expense ledger operations

use bigdecimal::{BigDecimal, ToPrimitive};

use crate::traits::{DefaultExpenseValidator, ExpenseStore, ExpenseValidator};
use crate::types::*;

/// Expense manager handling the owner-scoped ledger operations.
///
/// Every operation takes the authenticated owner's id explicitly; no call can
/// observe or mutate another user's rows. Validation always happens before
/// the store is touched, so a rejected call leaves the ledger unchanged.
pub struct ExpenseManager<S: ExpenseStore> {
    pub(crate) storage: S,
    validator: Box<dyn ExpenseValidator>,
}

impl<S: ExpenseStore> ExpenseManager<S> {
    /// Create a new expense manager with the default field validator
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultExpenseValidator),
        }
    }

    /// Create a new expense manager with a custom validator
    pub fn with_validator(storage: S, validator: Box<dyn ExpenseValidator>) -> Self {
        Self { storage, validator }
    }

    /// Record a new expense and return its assigned id
    pub async fn add_expense(
        &mut self,
        owner: UserId,
        date: &str,
        category: &str,
        amount: BigDecimal,
        description: &str,
    ) -> TrackerResult<ExpenseId> {
        let fields = self.validator.validate(date, category, &amount, description)?;
        let id = self.storage.insert_expense(owner, &fields).await?;

        tracing::debug!(owner, expense_id = id, "recorded expense");

        Ok(id)
    }

    /// List all of the owner's expenses, newest date first
    pub async fn list_expenses(&self, owner: UserId) -> TrackerResult<Vec<Expense>> {
        self.storage.list_expenses(owner).await
    }

    /// Fetch a single expense, e.g. to pre-populate an edit form
    pub async fn get_expense(&self, owner: UserId, id: ExpenseId) -> TrackerResult<Expense> {
        self.storage
            .get_expense(owner, id)
            .await?
            .ok_or(TrackerError::NotFound(id))
    }

    /// Overwrite the mutable fields of an existing expense.
    ///
    /// The id and owner never change; fails with [`TrackerError::NotFound`]
    /// when the id does not exist under this owner.
    pub async fn update_expense(
        &mut self,
        owner: UserId,
        id: ExpenseId,
        date: &str,
        category: &str,
        amount: BigDecimal,
        description: &str,
    ) -> TrackerResult<()> {
        let fields = self.validator.validate(date, category, &amount, description)?;

        if !self.storage.update_expense(owner, id, &fields).await? {
            return Err(TrackerError::NotFound(id));
        }

        tracing::debug!(owner, expense_id = id, "updated expense");

        Ok(())
    }

    /// Remove an expense permanently.
    ///
    /// There is no soft-delete: deleting an already-deleted id fails with
    /// [`TrackerError::NotFound`] rather than succeeding silently.
    pub async fn delete_expense(&mut self, owner: UserId, id: ExpenseId) -> TrackerResult<()> {
        if !self.storage.delete_expense(owner, id).await? {
            return Err(TrackerError::NotFound(id));
        }

        tracing::debug!(owner, expense_id = id, "deleted expense");

        Ok(())
    }

    /// Per-category totals for the owner, ordered by category ascending
    pub async fn summarize_by_category(&self, owner: UserId) -> TrackerResult<Vec<CategoryTotal>> {
        self.storage.totals_by_category(owner).await
    }

    /// Per-category totals with their percentage of the overall spend.
    ///
    /// Same aggregation as [`summarize_by_category`](Self::summarize_by_category),
    /// precomputed for chart-style views. Empty when the owner has no
    /// expenses.
    pub async fn category_shares(&self, owner: UserId) -> TrackerResult<Vec<CategoryShare>> {
        let totals = self.storage.totals_by_category(owner).await?;
        let grand_total: BigDecimal = totals.iter().map(|t| &t.total).sum();

        if grand_total == BigDecimal::from(0) {
            return Ok(Vec::new());
        }

        Ok(totals
            .into_iter()
            .map(|t| {
                let ratio = &t.total / &grand_total;
                CategoryShare {
                    category: t.category,
                    total: t.total,
                    percent: ratio.to_f64().unwrap_or(0.0) * 100.0,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::MemoryStorage;
    use chrono::NaiveDate;

    const OWNER: UserId = 1;

    fn manager() -> ExpenseManager<MemoryStorage> {
        ExpenseManager::new(MemoryStorage::new())
    }

    #[tokio::test]
    async fn add_then_list_round_trip() {
        let mut expenses = manager();

        let id = expenses
            .add_expense(OWNER, "2024-01-15", "Food", BigDecimal::from(25), "lunch")
            .await
            .unwrap();

        let listed = expenses.list_expenses(OWNER).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, id);
        assert_eq!(listed[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(listed[0].category, "Food");
        assert_eq!(listed[0].amount, BigDecimal::from(25));
        assert_eq!(listed[0].description, "lunch");
    }

    #[tokio::test]
    async fn invalid_amount_leaves_ledger_unchanged() {
        let mut expenses = manager();

        let result = expenses
            .add_expense(OWNER, "2024-01-15", "Food", BigDecimal::from(-5), "")
            .await;
        assert!(matches!(result, Err(TrackerError::InvalidAmount(_))));

        let result = expenses
            .add_expense(OWNER, "2024-01-15", "Food", BigDecimal::from(0), "")
            .await;
        assert!(matches!(result, Err(TrackerError::InvalidAmount(_))));

        assert!(expenses.list_expenses(OWNER).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_date_rejected() {
        let mut expenses = manager();

        for bad in ["2024/01/01", "Jan 1 2024", "01-01-2024", ""] {
            let result = expenses
                .add_expense(OWNER, bad, "Food", BigDecimal::from(5), "")
                .await;
            assert!(
                matches!(result, Err(TrackerError::InvalidDate(_))),
                "date {:?} should have been rejected",
                bad
            );
        }
    }

    #[tokio::test]
    async fn listing_is_date_descending_with_stable_ties() {
        let mut expenses = manager();

        let old = expenses
            .add_expense(OWNER, "2024-01-01", "Food", BigDecimal::from(1), "")
            .await
            .unwrap();
        let tie_first = expenses
            .add_expense(OWNER, "2024-02-01", "Rent", BigDecimal::from(2), "")
            .await
            .unwrap();
        let tie_second = expenses
            .add_expense(OWNER, "2024-02-01", "Health", BigDecimal::from(3), "")
            .await
            .unwrap();

        let listed = expenses.list_expenses(OWNER).await.unwrap();
        let ids: Vec<ExpenseId> = listed.iter().map(|e| e.id).collect();

        assert_eq!(ids, vec![tie_first, tie_second, old]);
    }

    #[tokio::test]
    async fn update_changes_only_mutable_fields() {
        let mut expenses = manager();

        let id = expenses
            .add_expense(OWNER, "2024-01-15", "Food", BigDecimal::from(25), "lunch")
            .await
            .unwrap();

        expenses
            .update_expense(OWNER, id, "2024-01-16", "Transport", BigDecimal::from(12), "bus")
            .await
            .unwrap();

        let updated = expenses.get_expense(OWNER, id).await.unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.owner, OWNER);
        assert_eq!(updated.date, NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());
        assert_eq!(updated.category, "Transport");
        assert_eq!(updated.amount, BigDecimal::from(12));
        assert_eq!(updated.description, "bus");
    }

    #[tokio::test]
    async fn update_unknown_id_fails_not_found() {
        let mut expenses = manager();

        let result = expenses
            .update_expense(OWNER, 99, "2024-01-16", "Food", BigDecimal::from(1), "")
            .await;

        assert!(matches!(result, Err(TrackerError::NotFound(99))));
    }

    #[tokio::test]
    async fn delete_twice_fails_second_time() {
        let mut expenses = manager();

        let id = expenses
            .add_expense(OWNER, "2024-01-15", "Food", BigDecimal::from(25), "")
            .await
            .unwrap();

        expenses.delete_expense(OWNER, id).await.unwrap();
        let retry = expenses.delete_expense(OWNER, id).await;

        assert!(matches!(retry, Err(TrackerError::NotFound(_))));
    }

    #[tokio::test]
    async fn summary_groups_and_sums() {
        let mut expenses = manager();

        expenses
            .add_expense(OWNER, "2024-01-01", "Food", BigDecimal::from(10), "")
            .await
            .unwrap();
        expenses
            .add_expense(OWNER, "2024-01-02", "Food", BigDecimal::from(5), "")
            .await
            .unwrap();
        expenses
            .add_expense(OWNER, "2024-01-03", "Rent", BigDecimal::from(20), "")
            .await
            .unwrap();

        let summary = expenses.summarize_by_category(OWNER).await.unwrap();

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].category, "Food");
        assert_eq!(summary[0].total, BigDecimal::from(15));
        assert_eq!(summary[1].category, "Rent");
        assert_eq!(summary[1].total, BigDecimal::from(20));
    }

    #[tokio::test]
    async fn shares_sum_to_one_hundred_percent() {
        let mut expenses = manager();

        expenses
            .add_expense(OWNER, "2024-01-01", "Food", BigDecimal::from(30), "")
            .await
            .unwrap();
        expenses
            .add_expense(OWNER, "2024-01-02", "Rent", BigDecimal::from(70), "")
            .await
            .unwrap();

        let shares = expenses.category_shares(OWNER).await.unwrap();

        assert_eq!(shares.len(), 2);
        assert!((shares[0].percent - 30.0).abs() < 1e-9);
        assert!((shares[1].percent - 70.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn shares_empty_without_expenses() {
        let expenses = manager();
        assert!(expenses.category_shares(OWNER).await.unwrap().is_empty());
    }
}
