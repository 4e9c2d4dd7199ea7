//! # Expense Core
//!
//! A personal expense tracker core providing user accounts and an
//! owner-scoped expense ledger over a local relational store.
//!
//! ## Features
//!
//! - **Account store**: registration with unique usernames and salted-hash
//!   credential checks
//! - **Expense ledger**: add, list, fetch, update, and delete expenses,
//!   always scoped to the authenticated user
//! - **Summaries**: per-category totals and percentage shares backing both
//!   tabular and chart views
//! - **Storage abstraction**: trait-based backends with a bundled SQLite
//!   implementation and an in-memory store for tests
//!
//! ## Quick Start
//!
//! ```rust
//! use expense_core::{ExpenseTracker, MemoryStorage};
//! use bigdecimal::BigDecimal;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), expense_core::TrackerError> {
//! let mut tracker = ExpenseTracker::new(MemoryStorage::new());
//!
//! let user = tracker.register("alice", "correct-horse").await?;
//! tracker
//!     .add_expense(user, "2024-01-15", "Food", BigDecimal::from(25), "lunch")
//!     .await?;
//!
//! for expense in tracker.list_expenses(user).await? {
//!     println!("{} {} {}", expense.date, expense.category, expense.amount);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod storage;
pub mod tracker;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use auth::*;
pub use storage::*;
pub use tracker::*;
pub use traits::*;
pub use types::*;
pub use utils::memory_storage::MemoryStorage;
