//! Basic expense tracker usage example

use bigdecimal::BigDecimal;
use expense_core::{ExpenseTracker, MemoryStorage, SUGGESTED_CATEGORIES};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("💸 Expense Core - Basic Tracker Example\n");

    // Create a tracker with in-memory storage; use
    // `SqliteStorage::connect_default()` for the persistent single-file store.
    let mut tracker = ExpenseTracker::new(MemoryStorage::new());

    // 1. Register and authenticate a user
    println!("👤 Registering user...");
    tracker.register("alice", "correct-horse").await?;
    let alice = tracker.authenticate("alice", "correct-horse").await?;
    println!("  ✓ Logged in as alice (id {})\n", alice);

    // 2. Record some spending
    println!("🧾 Recording expenses...");
    let entries = [
        ("2024-01-02", "Rent", 800, "January rent"),
        ("2024-01-05", "Food", 62, "weekly groceries"),
        ("2024-01-12", "Food", 18, "lunch out"),
        ("2024-01-15", "Transport", 40, "monthly pass"),
    ];

    for (date, category, amount, description) in entries {
        let id = tracker
            .add_expense(alice, date, category, BigDecimal::from(amount), description)
            .await?;
        println!("  ✓ #{}: {} {} ({})", id, date, amount, category);
    }
    println!();

    // 3. List them, newest date first
    println!("📋 Current ledger:");
    for expense in tracker.list_expenses(alice).await? {
        println!(
            "  #{} {} {:<10} {:>6}  {}",
            expense.id, expense.date, expense.category, expense.amount, expense.description
        );
    }
    println!();

    // 4. Fix a typo in the lunch entry
    let lunch = tracker.list_expenses(alice).await?[1].clone();
    tracker
        .update_expense(
            alice,
            lunch.id,
            "2024-01-12",
            "Food",
            BigDecimal::from(21),
            "lunch out (with tip)",
        )
        .await?;
    println!("✏️  Updated expense #{}\n", lunch.id);

    // 5. Summaries for the table view and the pie chart
    println!("📊 Totals by category:");
    for row in tracker.summarize_by_category(alice).await? {
        println!("  {:<10} {:>6}", row.category, row.total);
    }
    println!();

    println!("🥧 Share of spend:");
    for share in tracker.category_shares(alice).await? {
        println!("  {:<10} {:>5.1}%", share.category, share.percent);
    }
    println!();

    println!("Suggested categories for input forms: {:?}", SUGGESTED_CATEGORIES);

    Ok(())
}
