//! SQLite storage backend.
//!
//! Persists the two-table schema in a single local database file, creating it
//! on first connect. Every trait method maps to exactly one SQL statement;
//! owner scoping is enforced in the `WHERE` clause of each query, and every
//! low-level sqlx failure is converted to a typed error at this boundary.

use async_trait::async_trait;
use bigdecimal::{BigDecimal, ToPrimitive};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::path::Path;
use std::str::FromStr;

use crate::traits::{AccountStore, ExpenseStore};
use crate::types::*;

/// Default database file, matching the original single-file deployment
pub const DEFAULT_DB_PATH: &str = "budget.db";

impl From<sqlx::Error> for TrackerError {
    fn from(err: sqlx::Error) -> Self {
        TrackerError::StoreUnavailable(err.to_string())
    }
}

/// SQLite-backed storage implementing both store traits
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Open (or create) the database at `path` and ensure the schema exists
    pub async fn connect(path: impl AsRef<Path>) -> TrackerResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePool::connect_with(options).await?;
        let storage = Self { pool };
        storage.create_schema().await?;

        Ok(storage)
    }

    /// Open the database at the fixed default path
    pub async fn connect_default() -> TrackerResult<Self> {
        Self::connect(DEFAULT_DB_PATH).await
    }

    /// Open a private in-memory database, mainly for tests.
    ///
    /// The pool is pinned to a single connection that is never recycled,
    /// because an in-memory SQLite database lives and dies with its
    /// connection.
    pub async fn connect_in_memory() -> TrackerResult<Self> {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let storage = Self { pool };
        storage.create_schema().await?;

        Ok(storage)
    }

    async fn create_schema(&self) -> TrackerResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                user_id  INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS expenses (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id     INTEGER NOT NULL REFERENCES users(user_id),
                date        TEXT NOT NULL,
                category    TEXT NOT NULL,
                amount      REAL NOT NULL,
                description TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn user_from_row(row: &SqliteRow) -> TrackerResult<User> {
    Ok(User {
        id: row.try_get("user_id")?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password")?,
    })
}

fn expense_from_row(row: &SqliteRow) -> TrackerResult<Expense> {
    let amount = amount_from_f64(row.try_get("amount")?)?;
    let description: Option<String> = row.try_get("description")?;

    Ok(Expense {
        id: row.try_get("id")?,
        owner: row.try_get("user_id")?,
        date: row.try_get("date")?,
        category: row.try_get("category")?,
        amount,
        description: description.unwrap_or_default(),
    })
}

/// Amounts cross the REAL column as `f64`
fn amount_to_f64(amount: &BigDecimal) -> TrackerResult<f64> {
    amount
        .to_f64()
        .ok_or_else(|| TrackerError::InvalidAmount("Amount is out of range".to_string()))
}

/// Decode a REAL column value through its shortest decimal representation,
/// so a stored `0.1` reads back as `0.1` rather than the full binary
/// expansion of the double. Non-finite values fail the parse and surface as
/// a storage error.
fn amount_from_f64(raw: f64) -> TrackerResult<BigDecimal> {
    BigDecimal::from_str(&raw.to_string())
        .map_err(|_| TrackerError::StoreUnavailable(format!("unreadable amount in store: {raw}")))
}

#[async_trait]
impl AccountStore for SqliteStorage {
    async fn insert_user(&mut self, username: &str, password_hash: &str) -> TrackerResult<UserId> {
        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?1, ?2)")
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(TrackerError::DuplicateUsername(username.to_string()))
            }
            Err(err) => {
                tracing::error!(%err, "failed to insert user");
                Err(err.into())
            }
        }
    }

    async fn find_user(&self, username: &str) -> TrackerResult<Option<User>> {
        let row = sqlx::query("SELECT user_id, username, password FROM users WHERE username = ?1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(user_from_row).transpose()
    }
}

#[async_trait]
impl ExpenseStore for SqliteStorage {
    async fn insert_expense(
        &mut self,
        owner: UserId,
        fields: &NewExpense,
    ) -> TrackerResult<ExpenseId> {
        let done = sqlx::query(
            r#"
            INSERT INTO expenses (user_id, date, category, amount, description)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(owner)
        .bind(fields.date)
        .bind(&fields.category)
        .bind(amount_to_f64(&fields.amount)?)
        .bind(&fields.description)
        .execute(&self.pool)
        .await?;

        Ok(done.last_insert_rowid())
    }

    async fn list_expenses(&self, owner: UserId) -> TrackerResult<Vec<Expense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, date, category, amount, description
            FROM expenses
            WHERE user_id = ?1
            ORDER BY date DESC, id ASC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(expense_from_row).collect()
    }

    async fn get_expense(&self, owner: UserId, id: ExpenseId) -> TrackerResult<Option<Expense>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, date, category, amount, description
            FROM expenses
            WHERE id = ?1 AND user_id = ?2
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(expense_from_row).transpose()
    }

    async fn update_expense(
        &mut self,
        owner: UserId,
        id: ExpenseId,
        fields: &NewExpense,
    ) -> TrackerResult<bool> {
        let done = sqlx::query(
            r#"
            UPDATE expenses
            SET date = ?1, category = ?2, amount = ?3, description = ?4
            WHERE id = ?5 AND user_id = ?6
            "#,
        )
        .bind(fields.date)
        .bind(&fields.category)
        .bind(amount_to_f64(&fields.amount)?)
        .bind(&fields.description)
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await?;

        Ok(done.rows_affected() > 0)
    }

    async fn delete_expense(&mut self, owner: UserId, id: ExpenseId) -> TrackerResult<bool> {
        let done = sqlx::query("DELETE FROM expenses WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(done.rows_affected() > 0)
    }

    async fn totals_by_category(&self, owner: UserId) -> TrackerResult<Vec<CategoryTotal>> {
        let rows = sqlx::query(
            r#"
            SELECT category, SUM(amount) AS total
            FROM expenses
            WHERE user_id = ?1
            GROUP BY category
            ORDER BY category ASC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(CategoryTotal {
                    category: row.try_get("category")?,
                    total: amount_from_f64(row.try_get("total")?)?,
                })
            })
            .collect()
    }
}
