//! In-memory storage implementation for testing

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development.
///
/// Ids are handed out sequentially starting at 1, mirroring the
/// autoincrement behaviour of the SQLite backend.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    expenses: Arc<RwLock<HashMap<ExpenseId, Expense>>>,
    next_user_id: Arc<AtomicI64>,
    next_expense_id: Arc<AtomicI64>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            expenses: Arc::new(RwLock::new(HashMap::new())),
            next_user_id: Arc::new(AtomicI64::new(1)),
            next_expense_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.users.write().unwrap().clear();
        self.expenses.write().unwrap().clear();
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for MemoryStorage {
    async fn insert_user(&mut self, username: &str, password_hash: &str) -> TrackerResult<UserId> {
        let mut users = self.users.write().unwrap();

        if users.values().any(|user| user.username == username) {
            return Err(TrackerError::DuplicateUsername(username.to_string()));
        }

        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst);
        users.insert(
            id,
            User {
                id,
                username: username.to_string(),
                password_hash: password_hash.to_string(),
            },
        );

        Ok(id)
    }

    async fn find_user(&self, username: &str) -> TrackerResult<Option<User>> {
        Ok(self
            .users
            .read()
            .unwrap()
            .values()
            .find(|user| user.username == username)
            .cloned())
    }
}

#[async_trait]
impl ExpenseStore for MemoryStorage {
    async fn insert_expense(
        &mut self,
        owner: UserId,
        fields: &NewExpense,
    ) -> TrackerResult<ExpenseId> {
        let id = self.next_expense_id.fetch_add(1, Ordering::SeqCst);

        self.expenses.write().unwrap().insert(
            id,
            Expense {
                id,
                owner,
                date: fields.date,
                category: fields.category.clone(),
                amount: fields.amount.clone(),
                description: fields.description.clone(),
            },
        );

        Ok(id)
    }

    async fn list_expenses(&self, owner: UserId) -> TrackerResult<Vec<Expense>> {
        let expenses = self.expenses.read().unwrap();
        let mut rows: Vec<Expense> = expenses
            .values()
            .filter(|expense| expense.owner == owner)
            .cloned()
            .collect();

        // Date descending, insertion order within equal dates
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(a.id.cmp(&b.id)));

        Ok(rows)
    }

    async fn get_expense(&self, owner: UserId, id: ExpenseId) -> TrackerResult<Option<Expense>> {
        Ok(self
            .expenses
            .read()
            .unwrap()
            .get(&id)
            .filter(|expense| expense.owner == owner)
            .cloned())
    }

    async fn update_expense(
        &mut self,
        owner: UserId,
        id: ExpenseId,
        fields: &NewExpense,
    ) -> TrackerResult<bool> {
        let mut expenses = self.expenses.write().unwrap();

        match expenses.get_mut(&id) {
            Some(expense) if expense.owner == owner => {
                expense.date = fields.date;
                expense.category = fields.category.clone();
                expense.amount = fields.amount.clone();
                expense.description = fields.description.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_expense(&mut self, owner: UserId, id: ExpenseId) -> TrackerResult<bool> {
        let mut expenses = self.expenses.write().unwrap();

        match expenses.get(&id) {
            Some(expense) if expense.owner == owner => {
                expenses.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn totals_by_category(&self, owner: UserId) -> TrackerResult<Vec<CategoryTotal>> {
        let expenses = self.expenses.read().unwrap();
        let mut totals: BTreeMap<String, BigDecimal> = BTreeMap::new();

        for expense in expenses.values().filter(|expense| expense.owner == owner) {
            let entry = totals
                .entry(expense.category.clone())
                .or_insert_with(|| BigDecimal::from(0));
            *entry += &expense.amount;
        }

        // BTreeMap iteration gives the documented category-ascending order
        Ok(totals
            .into_iter()
            .map(|(category, total)| CategoryTotal { category, total })
            .collect())
    }
}
