//! Report command implementations

use anyhow::{bail, Result};
use chrono::{Datelike, Utc};
use outlay_core::reports::{budget_status, daily_report, monthly_report};
use outlay_core::Database;

use super::{day_or_today, truncate};

pub fn cmd_report_daily(db: &Database, date: Option<&str>) -> Result<()> {
    let day = day_or_today(date)?;
    let report = daily_report(db, day)?;

    println!();
    println!("📊 Daily Report — {}", report.date.format("%Y-%m-%d"));
    println!("   ─────────────────────────────");
    println!("   Total spent: {:.2}", report.total_amount);
    println!("   Expenses:    {}", report.expense_count);

    Ok(())
}

pub fn cmd_report_monthly(db: &Database, month: Option<u32>, year: Option<i32>) -> Result<()> {
    let now = Utc::now();
    let month = month.unwrap_or_else(|| now.month());
    let year = year.unwrap_or_else(|| now.year());
    if !(1..=12).contains(&month) {
        bail!("Month must be 1-12, got {}", month);
    }

    let report = monthly_report(db, month, year)?;

    println!();
    println!("📊 Monthly Report — {}-{:02}", report.year, report.month);
    println!("   ─────────────────────────────────────────────");
    println!("   Total: {:.2}", report.total_amount);

    if report.category_breakdown.is_empty() {
        println!("   No spending found in this month.");
        return Ok(());
    }

    let categories = db.list_categories()?;
    let category_name = |id: i64| {
        categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            // Deleted categories show up under their raw id.
            .unwrap_or_else(|| format!("#{}", id))
    };

    println!();
    println!(
        "   {:16} │ {:>10} │ {:>6} │ {:>5}",
        "Category", "Amount", "%", "Count"
    );
    println!("   ─────────────────┼────────────┼────────┼───────");
    for slice in report.category_breakdown.values() {
        println!(
            "   {:16} │ {:>10.2} │ {:>5.1}% │ {:>5}",
            truncate(&category_name(slice.category_id), 16),
            slice.amount,
            slice.percentage,
            slice.count
        );
    }

    let statuses = budget_status(db, month, year)?;
    if !statuses.is_empty() {
        println!();
        println!(
            "   {:16} │ {:>10} │ {:>10} │ {:>10}",
            "Budget", "Limit", "Spent", "Left"
        );
        println!("   ─────────────────┼────────────┼────────────┼────────────");
        for status in &statuses {
            let marker = if status.remaining < 0.0 { " ⚠️" } else { "" };
            println!(
                "   {:16} │ {:>10.2} │ {:>10.2} │ {:>10.2}{}",
                truncate(&category_name(status.category_id), 16),
                status.limit,
                status.spent,
                status.remaining,
                marker
            );
        }
    }

    Ok(())
}
