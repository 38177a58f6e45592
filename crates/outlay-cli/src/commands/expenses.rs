//! Expense command implementations

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use outlay_core::{parse_expense, Database, Expense, ExpenseStore, SyncStatus};

use super::{parse_day, resolve_category, truncate};

/// Fallback category for parsed phrases that match nothing
const FALLBACK_CATEGORY: &str = "Others";

pub async fn cmd_add(
    store: &ExpenseStore,
    amount: Option<f64>,
    category: Option<&str>,
    date: Option<&str>,
    note: &str,
    text: Option<&str>,
) -> Result<()> {
    let (amount, category_name, date, note) = match text {
        Some(phrase) => {
            let categories = store.db().list_categories()?;
            let parsed = parse_expense(phrase, &categories);

            let amount = parsed
                .amount
                .with_context(|| format!("Could not find an amount in: {}", phrase))?;
            let category_name = category
                .map(str::to_string)
                .or(parsed.category_name)
                .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());
            let note = if note.is_empty() { phrase } else { note };
            (amount, category_name, parsed.date.unwrap_or_else(Utc::now), note.to_string())
        }
        None => {
            let amount = amount.context("Either --amount or --text is required")?;
            let category_name = category.unwrap_or(FALLBACK_CATEGORY).to_string();
            let date = match date {
                Some(s) => parse_day(s)?,
                None => Utc::now(),
            };
            (amount, category_name, date, note.to_string())
        }
    };

    if amount <= 0.0 {
        bail!("Amount must be positive, got {}", amount);
    }

    let category = resolve_category(store.db(), &category_name)?;
    let expense = Expense::new(amount, category.id, date, &note);
    let id = store.insert(&expense).await?;

    let stored = store
        .db()
        .get_expense(id)?
        .context("Expense vanished after insert")?;

    println!(
        "✅ Added expense #{}: {:.2} on {} {} [{}]",
        id,
        amount,
        category.icon,
        category.name,
        status_label(stored.sync_status)
    );

    Ok(())
}

pub fn cmd_list(
    db: &Database,
    category: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<()> {
    let expenses = match (category, from, to) {
        (Some(name), None, None) => {
            let category = resolve_category(db, name)?;
            db.list_expenses_by_category(category.id)?
        }
        (None, Some(from), Some(to)) => {
            let start = parse_day(from)?;
            // The --to day is inclusive, so extend to its last second.
            let end = parse_day(to)? + Duration::days(1) - Duration::seconds(1);
            db.list_expenses_by_date_range(start, end)?
        }
        (None, None, None) => db.list_expenses()?,
        _ => bail!("Use either --category or a --from/--to pair, not both"),
    };

    if expenses.is_empty() {
        println!("No expenses found.");
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
        "   {:>5} │ {:>10} │ {:16} │ {:14} │ {:7} │ Note",
        "ID", "Amount", "Date", "Category", "Sync"
    );
    println!("   ──────┼────────────┼──────────────────┼────────────────┼─────────┼──────");
    for expense in &expenses {
        println!(
            "   {:>5} │ {:>10.2} │ {:16} │ {:14} │ {:7} │ {}",
            expense.id,
            expense.amount,
            expense.date.format("%Y-%m-%d %H:%M"),
            truncate(&category_name(expense.category_id), 14),
            status_label(expense.sync_status),
            truncate(&expense.note, 40),
        );
    }
    println!();
    println!("   {} expense(s)", expenses.len());

    Ok(())
}

pub async fn cmd_delete(store: &ExpenseStore, id: i64) -> Result<()> {
    if store.db().get_expense(id)?.is_none() {
        bail!("No expense with id {}", id);
    }

    store.delete(id).await?;
    println!("🗑️  Deleted expense #{} (local only)", id);
    Ok(())
}

fn status_label(status: SyncStatus) -> &'static str {
    match status {
        SyncStatus::Pending => "PENDING",
        SyncStatus::Synced => "SYNCED",
        SyncStatus::Failed => "FAILED",
    }
}

/// Shared date helper for report commands
pub fn day_or_today(date: Option<&str>) -> Result<DateTime<Utc>> {
    match date {
        Some(s) => parse_day(s),
        None => Ok(Utc::now()),
    }
}
