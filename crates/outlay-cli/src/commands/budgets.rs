//! Budget command implementations

use anyhow::{bail, Result};
use chrono::{Datelike, Utc};
use outlay_core::{Budget, Database};

use super::resolve_category;

pub fn cmd_budgets_list(db: &Database) -> Result<()> {
    let budgets = db.list_budgets()?;

    if budgets.is_empty() {
        println!("No budgets set.");
        return Ok(());
    }

    let categories = db.list_categories()?;
    let category_name = |id: i64| {
        categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("#{}", id))
    };

    println!();
    println!(
        "   {:>5} │ {:16} │ {:>7} │ {:>10}",
        "ID", "Category", "Month", "Amount"
    );
    println!("   ──────┼──────────────────┼─────────┼────────────");
    for budget in &budgets {
        println!(
            "   {:>5} │ {:16} │ {:>4}-{:02} │ {:>10.2}",
            budget.id,
            category_name(budget.category_id),
            budget.year,
            budget.month,
            budget.amount
        );
    }

    Ok(())
}

pub fn cmd_budgets_set(
    db: &Database,
    category: &str,
    amount: f64,
    month: Option<u32>,
    year: Option<i32>,
) -> Result<()> {
    if amount <= 0.0 {
        bail!("Budget amount must be positive, got {}", amount);
    }

    let now = Utc::now();
    let month = month.unwrap_or_else(|| now.month());
    let year = year.unwrap_or_else(|| now.year());
    if !(1..=12).contains(&month) {
        bail!("Month must be 1-12, got {}", month);
    }

    let category = resolve_category(db, category)?;
    let id = db.set_budget(&Budget {
        id: 0,
        category_id: category.id,
        amount,
        month,
        year,
    })?;

    println!(
        "✅ Budget #{}: {:.2} for {} in {}-{:02}",
        id, amount, category.name, year, month
    );
    Ok(())
}

pub fn cmd_budgets_delete(db: &Database, id: i64) -> Result<()> {
    db.delete_budget(id)?;
    println!("🗑️  Deleted budget #{}", id);
    Ok(())
}
